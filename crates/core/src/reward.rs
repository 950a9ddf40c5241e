use serde::{Deserialize, Serialize};

/// Something handed out when a reward request is approved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    #[serde(default = "new_reward_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub reward_type: RewardType,
    pub amount: f64,
}

fn new_reward_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardType {
    Cash,
    Point,
    Coupon,
    Item,
}
