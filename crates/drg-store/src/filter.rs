use rusqlite::types::Value;

/// Column-equals-text conditions joined with `AND`.
///
/// An empty filter selects every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowFilter {
    conditions: Vec<(&'static str, Value)>,
}

impl RowFilter {
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn eq(mut self, column: &'static str, value: impl Into<String>) -> Self {
        self.conditions.push((column, Value::Text(value.into())));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn conditions(&self) -> &[(&'static str, Value)] {
        &self.conditions
    }

    pub(crate) fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            return String::new();
        }
        let parts: Vec<String> = self
            .conditions
            .iter()
            .enumerate()
            .map(|(idx, (column, _))| format!("\"{column}\" = ?{}", idx + 1))
            .collect();
        format!(" WHERE {}", parts.join(" AND "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_has_no_where_clause() {
        assert_eq!(RowFilter::all().where_clause(), "");
    }

    #[test]
    fn conditions_are_numbered_in_order() {
        let filter = RowFilter::all()
            .eq("name", "X")
            .eq("department", "心内科");
        assert_eq!(
            filter.where_clause(),
            " WHERE \"name\" = ?1 AND \"department\" = ?2"
        );
    }

    #[test]
    fn values_bind_as_text() {
        let patient = String::from("00123");
        let filter = RowFilter::all()
            .eq("patient_name", "张三")
            .eq("record", patient);
        assert_eq!(
            filter.conditions(),
            &[
                ("patient_name", Value::Text("张三".to_string())),
                ("record", Value::Text("00123".to_string())),
            ]
        );
    }
}
