/// The rendered statement along with its metadata.
///
/// Builders without anything to render (no selected fields, no columns to
/// insert or update) return a diagnostic info instead: `sql` then holds a
/// human readable message and [`StatementInfo::is_diagnostic`] is true.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatementInfo {
    sql: String,
    fields: String,
    fields_count: usize,
    param_fields: String,
    param_count: usize,
    returning_fields: String,
    read_only: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    diagnostic: bool,
}

impl StatementInfo {
    pub(crate) fn diagnostic(message: &str) -> Self {
        tracing::debug!(diagnostic = message, "statement has nothing to render");
        Self {
            sql: message.to_string(),
            diagnostic: true,
            ..Default::default()
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn fields(&self) -> &str {
        &self.fields
    }

    pub fn fields_count(&self) -> usize {
        self.fields_count
    }

    pub fn param_fields(&self) -> &str {
        &self.param_fields
    }

    pub fn param_count(&self) -> usize {
        self.param_count
    }

    pub fn returning_fields(&self) -> &str {
        &self.returning_fields
    }

    pub fn read_only(&self) -> bool {
        self.read_only
    }

    pub fn is_diagnostic(&self) -> bool {
        self.diagnostic
    }
}

#[derive(Debug, Default, Clone)]
pub(crate) struct BuildState {
    field_count: usize,
    param_count: usize,
    fields: String,
    params: String,
    returning: String,
}

fn push_csv(csv: &mut String, value: &str) {
    if value.is_empty() {
        return;
    }
    if !csv.is_empty() {
        csv.push_str(", ");
    }
    csv.push_str(value);
}

impl BuildState {
    pub(crate) fn starting_at(param_count: usize) -> Self {
        Self {
            param_count,
            ..Default::default()
        }
    }

    pub(crate) fn param_count(&self) -> usize {
        self.param_count
    }

    pub(crate) fn push_field(&mut self, field: &str) {
        if field.is_empty() {
            return;
        }
        self.field_count += 1;
        push_csv(&mut self.fields, field);
    }

    pub(crate) fn next_param(&mut self, field: &str) -> usize {
        self.param_count += 1;
        push_csv(&mut self.params, field);
        self.param_count
    }

    pub(crate) fn push_returning(&mut self, field: &str) {
        push_csv(&mut self.returning, field);
    }

    pub(crate) fn adopt(&mut self, sub: BuildState) {
        self.param_count = sub.param_count;
        push_csv(&mut self.params, &sub.params);
    }

    pub(crate) fn finish(self, sql: String, read_only: bool) -> StatementInfo {
        StatementInfo {
            sql,
            fields: self.fields,
            fields_count: self.field_count,
            param_fields: self.params,
            param_count: self.param_count,
            returning_fields: self.returning,
            read_only,
            diagnostic: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_params_are_numbered_from_start() {
        let mut state = BuildState::starting_at(2);
        assert_eq!(3, state.next_param("id"));
        assert_eq!(4, state.next_param("name"));
        let info = state.finish(String::new(), true);
        assert_eq!("id, name", info.param_fields());
        assert_eq!(4, info.param_count());
    }

    #[test]
    fn test_empty_field_is_skipped() {
        let mut state = BuildState::default();
        state.push_field("");
        state.push_field("id");
        let info = state.finish(String::new(), false);
        assert_eq!("id", info.fields());
        assert_eq!(1, info.fields_count());
    }

    #[test]
    fn test_adopt_sub_query() {
        let mut parent = BuildState::default();
        parent.push_field("id");
        parent.next_param("a");

        let mut sub = BuildState::starting_at(parent.param_count());
        sub.push_field("inner");
        sub.next_param("b");
        sub.next_param("c");

        parent.adopt(sub);
        parent.next_param("d");

        let info = parent.finish(String::new(), true);
        assert_eq!("id", info.fields());
        assert_eq!("a, b, c, d", info.param_fields());
        assert_eq!(4, info.param_count());
    }

    #[test]
    fn test_diagnostic() {
        let info = StatementInfo::diagnostic("no fields to select");
        assert!(info.is_diagnostic());
        assert_eq!("no fields to select", info.sql());
        assert_eq!(0, info.param_count());
        assert!(!info.read_only());
    }
}
