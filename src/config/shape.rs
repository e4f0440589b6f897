use serde::Deserialize;

use crate::render::Format;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Service {
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
    pub timeout: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct View {
    pub skip: Option<i64>,
    pub limit: Option<u32>,
    pub fetch_on_change: Option<bool>,
    pub format: Option<Format>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub service: Option<Service>,
    pub view: Option<View>,
}
