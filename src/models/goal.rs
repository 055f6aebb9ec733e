use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Goal {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) target_amount: Decimal,
    /// May exceed `target_amount`.
    #[serde(default)]
    pub(crate) current_amount: Decimal,
    pub(crate) start_date: NaiveDate,
    pub(crate) end_date: NaiveDate,
}
