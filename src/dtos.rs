use serde::Deserialize;

/// Optional equality filters accepted by the list endpoint; any subset may
/// be supplied and the criteria combine conjunctively.
#[derive(Debug, Deserialize, Default)]
pub struct FilterQueryDto {
    pub product_id: Option<i64>,
    pub rec_product_id: Option<i64>,
    #[serde(rename = "type")]
    pub rec_type: Option<String>,
}
