#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    /// Suffix used by PostgREST's `order=<column>.<direction>` parameter.
    pub fn as_rest(&self) -> &'static str {
        match self {
            OrderDirection::Asc => "asc",
            OrderDirection::Desc => "desc",
        }
    }
}

/// Equality filter on a single column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCondition {
    pub column: &'static str,
    pub value: String,
}

/// Filters, ordering and row cap for a select against a remote table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryCriteria {
    pub conditions: Vec<FilterCondition>,
    pub order_by: Vec<(&'static str, OrderDirection)>,
    pub limit: Option<usize>,
}

impl QueryCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps only rows whose `column` equals `value`.
    pub fn add_filter(mut self, column: &'static str, value: impl Into<String>) -> Self {
        self.conditions.push(FilterCondition {
            column,
            value: value.into(),
        });
        self
    }

    pub fn order_by(mut self, column: &'static str, direction: OrderDirection) -> Self {
        self.order_by.push((column, direction));
        self
    }

    pub fn limit(mut self, limit_val: usize) -> Self {
        self.limit = Some(limit_val);
        self
    }

    /// Renders the criteria as PostgREST query parameters, `select=*` first.
    pub fn to_rest_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), "*".to_string())];

        for condition in &self.conditions {
            params.push((condition.column.to_string(), format!("eq.{}", condition.value)));
        }

        if !self.order_by.is_empty() {
            let order = self.order_by
                .iter()
                .map(|(column, direction)| format!("{}.{}", column, direction.as_rest()))
                .collect::<Vec<_>>()
                .join(",");
            params.push(("order".to_string(), order));
        }

        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        params
    }
}
