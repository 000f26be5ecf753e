/// Renders stand-alone `IN` fragments with the values inlined.
///
/// With `pg_array` set the fragment uses the postgres array form
/// `col=ANY('{1,2}'::integer[])`, otherwise a plain `col IN (1,2)` list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InBuilder {
    pg_array: bool,
}

impl InBuilder {
    pub fn new(pg_array: bool) -> Self {
        Self { pg_array }
    }

    pub fn build_int_in(&self, field: &str, values: &[i64]) -> String {
        int_list(field, values, self.pg_array)
    }

    pub fn build_float_in(&self, field: &str, values: &[f64]) -> String {
        float_list(field, values, self.pg_array)
    }

    pub fn build_str_in<S: AsRef<str>>(&self, field: &str, values: &[S]) -> String {
        str_list(field, values, self.pg_array)
    }
}

fn join<T, F>(values: &[T], sep: &str, mut item: F) -> String
where
    F: FnMut(&mut String, &T),
{
    let mut csv = String::new();
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            csv.push_str(sep);
        }
        item(&mut csv, value);
    }
    csv
}

fn any_array(field: &str, csv: &str, ty: &str) -> String {
    format!("{field}=ANY('{{{csv}}}'::{ty}[])")
}

pub(crate) fn int_list(field: &str, values: &[i64], pg_array: bool) -> String {
    let csv = join(values, ",", |csv, value| csv.push_str(&value.to_string()));
    if pg_array {
        any_array(field, &csv, "integer")
    } else {
        format!("{field} IN ({csv})")
    }
}

pub(crate) fn float_list(field: &str, values: &[f64], pg_array: bool) -> String {
    let csv = join(values, ",", |csv, value| csv.push_str(&format!("{:.6}", value)));
    if pg_array {
        any_array(field, &csv, "numeric")
    } else {
        format!("{field} IN ({csv})")
    }
}

pub(crate) fn str_list<S: AsRef<str>>(field: &str, values: &[S], pg_array: bool) -> String {
    if pg_array {
        let csv = join(values, ",", |csv, value| csv.push_str(value.as_ref()));
        any_array(field, &csv, "text")
    } else {
        let csv = join(values, "','", |csv, value| csv.push_str(value.as_ref()));
        format!("{field} IN ('{csv}')")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_int_in() {
        assert_eq!("id IN (2,4)", InBuilder::new(false).build_int_in("id", &[2, 4]));
        assert_eq!(
            "id=ANY('{2,4}'::integer[])",
            InBuilder::new(true).build_int_in("id", &[2, 4])
        );
    }

    #[test]
    fn test_float_in() {
        assert_eq!(
            "price IN (1.500000,2.000000)",
            InBuilder::new(false).build_float_in("price", &[1.5, 2.0])
        );
        assert_eq!(
            "price=ANY('{0.250000}'::numeric[])",
            InBuilder::new(true).build_float_in("price", &[0.25])
        );
    }

    #[test]
    fn test_str_in() {
        assert_eq!(
            "name IN ('a','b')",
            InBuilder::new(false).build_str_in("name", &["a", "b"])
        );
        assert_eq!(
            "name=ANY('{a,b}'::text[])",
            InBuilder::new(true).build_str_in("name", &["a", "b"])
        );
    }

    #[test]
    fn test_empty_list() {
        assert_eq!("id IN ()", int_list("id", &[], false));
        assert_eq!("id=ANY('{}'::integer[])", int_list("id", &[], true));
    }
}
