use chrono::{DateTime, Utc};

/// Fulfilment steps. Both answer with the updated order.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    MarkPaid { at: DateTime<Utc> },
    /// Refused unless the order has been paid.
    MarkDelivered { at: DateTime<Utc> },
}
