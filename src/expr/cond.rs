use crate::{
    Raw,
    builder::SelectBuilder,
    error::{Error, Result},
    ident::{Ident, IntoIdent},
    operator::Operator,
    writer::{FormatContext, FormatWriter},
};

use super::r#in::{float_list, int_list, str_list};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Conjunction {
    #[default]
    And,
    Or,
}

impl Conjunction {
    fn between_groups(&self) -> &'static str {
        match self {
            Conjunction::And => " AND ",
            Conjunction::Or => " OR ",
        }
    }

    fn within_group(&self) -> &'static str {
        match self {
            Conjunction::And => " and ",
            Conjunction::Or => " or ",
        }
    }
}

/// A single predicate of a where clause.
///
/// The field name orders the condition inside its group and is credited for
/// every parameter the condition adds. It is never checked against a schema.
#[derive(Debug, Clone)]
pub enum Condition {
    Plain {
        field: Ident,
        predicate: Raw,
    },
    SubQuery {
        field: Ident,
        operator: Operator,
        query: Box<SelectBuilder>,
    },
}

macro_rules! comparisons {
    ($( $plain:ident, $sub:ident => $op:ident, $sym:literal; )+) => {
        impl Condition {
            $(
                #[doc = concat!("`lhs", $sym, "rhs`, a `?` in either side becomes a parameter.")]
                pub fn $plain<L, R>(lhs: L, rhs: R) -> Self
                where
                    L: AsRef<str>,
                    R: AsRef<str>,
                {
                    Self::binary(lhs.as_ref(), Operator::$op, rhs.as_ref())
                }

                #[doc = concat!("`col", $sym, "(sub-query)`.")]
                pub fn $sub<C: IntoIdent>(col: C, query: SelectBuilder) -> Self {
                    Self::sub_query(col, Operator::$op, query)
                }
            )+
        }
    };
}

comparisons! {
    eq, eq_sub => Eq, "=";
    neq, neq_sub => NotEq, "!=";
    gt, gt_sub => Gt, ">";
    gte, gte_sub => Gte, ">=";
    lt, lt_sub => Lt, "<";
    lte, lte_sub => Lte, "<=";
}

impl Condition {
    pub fn raw<C, P>(field: C, predicate: P) -> Self
    where
        C: IntoIdent,
        P: AsRef<str>,
    {
        Condition::Plain {
            field: field.into_ident(),
            predicate: Raw::new(predicate),
        }
    }

    fn binary(lhs: &str, operator: Operator, rhs: &str) -> Self {
        let predicate = format!("{}{}{}", lhs, operator.as_str(), rhs);
        Self::raw(lhs, predicate)
    }

    fn sub_query<C: IntoIdent>(col: C, operator: Operator, query: SelectBuilder) -> Self {
        Condition::SubQuery {
            field: col.into_ident(),
            operator,
            query: Box::new(query),
        }
    }

    pub fn between<C, L, H>(col: C, low: L, high: H) -> Self
    where
        C: AsRef<str>,
        L: AsRef<str>,
        H: AsRef<str>,
    {
        let col = col.as_ref();
        let predicate = format!("{} between {} and {}", col, low.as_ref(), high.as_ref());
        Self::raw(col, predicate)
    }

    pub fn in_int<C: AsRef<str>>(col: C, values: &[i64], pg_array: bool) -> Self {
        let col = col.as_ref();
        Self::raw(col, int_list(col, values, pg_array))
    }

    pub fn in_float<C: AsRef<str>>(col: C, values: &[f64], pg_array: bool) -> Self {
        let col = col.as_ref();
        Self::raw(col, float_list(col, values, pg_array))
    }

    pub fn in_str<C, S>(col: C, values: &[S], pg_array: bool) -> Self
    where
        C: AsRef<str>,
        S: AsRef<str>,
    {
        let col = col.as_ref();
        Self::raw(col, str_list(col, values, pg_array))
    }

    /// `col IN (sub-query)`, the only `IN` form that takes parameters.
    pub fn in_sub<C: IntoIdent>(col: C, query: SelectBuilder) -> Self {
        Self::sub_query(col, Operator::In, query)
    }

    pub fn field(&self) -> &str {
        match self {
            Condition::Plain { field, .. } | Condition::SubQuery { field, .. } => field.as_str(),
        }
    }
}

impl FormatWriter for Condition {
    fn format_writer<W: std::fmt::Write>(
        &self,
        context: &mut FormatContext<'_, W>,
    ) -> std::fmt::Result {
        match self {
            Condition::Plain { field, predicate } => predicate.write_bound(field.as_str(), context),
            Condition::SubQuery {
                field,
                operator,
                query,
            } => {
                field.format_writer(context)?;
                operator.format_writer(context)?;
                context.write_sub_query(query.as_ref())
            }
        }
    }
}

/// One parenthesized group of conditions.
#[derive(Debug, Clone)]
pub(crate) struct ConditionGroup {
    join: Option<Conjunction>,
    inner: Conjunction,
    conditions: Vec<Condition>,
}

impl FormatWriter for ConditionGroup {
    fn format_writer<W: std::fmt::Write>(
        &self,
        context: &mut FormatContext<'_, W>,
    ) -> std::fmt::Result {
        if let Some(join) = self.join {
            context.writer.write_str(join.between_groups())?;
        }

        // same conditions always render the same, whatever the call order
        let mut sorted: Vec<&Condition> = self.conditions.iter().collect();
        sorted.sort_by(|a, b| a.field().cmp(b.field()));

        context.writer.write_char('(')?;
        for (index, condition) in sorted.into_iter().enumerate() {
            if index > 0 {
                context.writer.write_str(self.inner.within_group())?;
            }
            condition.format_writer(context)?;
        }
        context.writer.write_char(')')
    }
}

/// Where clause groups, rendered in insertion order.
#[derive(Debug, Default, Clone)]
pub(crate) struct Conditions {
    groups: Vec<ConditionGroup>,
    has_where: bool,
}

impl Conditions {
    fn next_join(&self, join: Conjunction) -> Option<Conjunction> {
        if self.groups.is_empty() {
            None
        } else {
            Some(join)
        }
    }

    /// Add a default group, joined with `AND` unless it is the first one
    /// rendered. An empty list adds nothing but still opens the clause for
    /// later groups.
    pub(crate) fn push_where(&mut self, conditions: Vec<Condition>) {
        self.has_where = true;
        if conditions.is_empty() {
            return;
        }
        let join = self.next_join(Conjunction::And);
        self.groups.push(ConditionGroup {
            join,
            inner: Conjunction::And,
            conditions,
        });
    }

    pub(crate) fn push_group(
        &mut self,
        join: Conjunction,
        inner: Conjunction,
        conditions: Vec<Condition>,
    ) -> Result<()> {
        if !self.has_where {
            return Err(Error::MissingWhere);
        }
        if conditions.is_empty() {
            return Ok(());
        }
        let join = self.next_join(join);
        self.groups.push(ConditionGroup {
            join,
            inner,
            conditions,
        });
        Ok(())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl FormatWriter for Conditions {
    fn format_writer<W: std::fmt::Write>(
        &self,
        context: &mut FormatContext<'_, W>,
    ) -> std::fmt::Result {
        if self.groups.is_empty() {
            return Ok(());
        }
        context.writer.write_str("where ")?;
        for group in &self.groups {
            group.format_writer(context)?;
        }
        Ok(())
    }
}

/// Where clause methods shared by every builder owning a `conditions` field.
macro_rules! where_methods {
    ($builder:ty) => {
        impl $builder {
            /// Add a group of conditions joined with `and`.
            ///
            /// The first call opens the where clause, later calls add a group
            /// joined with `AND`.
            pub fn where_<I>(&mut self, conditions: I) -> &mut Self
            where
                I: IntoIterator<Item = $crate::Condition>,
            {
                self.conditions.push_where(conditions.into_iter().collect());
                self
            }

            /// Add a group joined to the previous ones with `join`, e.g.
            /// `where (a=1) OR (b=2)`.
            pub fn where_group<I>(
                &mut self,
                join: $crate::Conjunction,
                conditions: I,
            ) -> $crate::Result<&mut Self>
            where
                I: IntoIterator<Item = $crate::Condition>,
            {
                self.where_group_with(join, $crate::Conjunction::And, conditions)
            }

            /// Like [`Self::where_group`], with `inner` joining the conditions
            /// of the group itself.
            pub fn where_group_with<I>(
                &mut self,
                join: $crate::Conjunction,
                inner: $crate::Conjunction,
                conditions: I,
            ) -> $crate::Result<&mut Self>
            where
                I: IntoIterator<Item = $crate::Condition>,
            {
                self.conditions
                    .push_group(join, inner, conditions.into_iter().collect())?;
                Ok(self)
            }
        }
    };
}

pub(crate) use where_methods;
