use log::error;
use serde::Deserialize;

const SITE_CONTENT: &str = include_str!("../content.json");

#[derive(Deserialize, Clone, PartialEq, Default, Debug)]
#[serde(default)]
pub struct SiteContent {
    pub home: HomeContent,
    pub events: EventsContent,
    pub team: TeamContent,
}

#[derive(Deserialize, Clone, PartialEq, Default, Debug)]
#[serde(default)]
pub struct HomeContent {
    pub hero: Hero,
    pub about: About,
    pub mission: Mission,
}

#[derive(Deserialize, Clone, PartialEq, Default, Debug)]
#[serde(default, rename_all = "camelCase")]
pub struct Hero {
    pub title: String,
    pub subtitle: String,
    pub cta_label: String,
    /// Form type tag, e.g. `"join-club"`.
    pub cta_form: String,
}

#[derive(Deserialize, Clone, PartialEq, Default, Debug)]
#[serde(default)]
pub struct About {
    pub title: String,
    pub subtitle: String,
    pub content: String,
}

#[derive(Deserialize, Clone, PartialEq, Default, Debug)]
#[serde(default)]
pub struct Mission {
    pub title: String,
    pub points: Vec<MissionPoint>,
}

#[derive(Deserialize, Clone, PartialEq, Default, Debug)]
pub struct MissionPoint {
    pub title: String,
    pub description: String,
}

#[derive(Deserialize, Clone, PartialEq, Default, Debug)]
#[serde(default)]
pub struct EventsContent {
    pub title: String,
    pub subtitle: String,
    pub items: Vec<ClubEvent>,
}

#[derive(Deserialize, Clone, PartialEq, Debug)]
pub struct ClubEvent {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub description: String,
}

#[derive(Deserialize, Clone, PartialEq, Default, Debug)]
#[serde(default, rename_all = "camelCase")]
pub struct TeamContent {
    pub title: String,
    pub subtitle: String,
    pub cta_label: String,
    pub cta_form: String,
    pub members: Vec<Member>,
}

#[derive(Deserialize, Clone, PartialEq, Debug)]
pub struct Member {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub bio: String,
}

pub fn parse(raw: &str) -> Result<SiteContent, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Site copy bundled into the binary. Broken content renders empty pages
/// rather than no site at all.
pub fn load() -> SiteContent {
    parse(SITE_CONTENT).unwrap_or_else(|e| {
        error!("Failed to parse site content: {}", e);
        SiteContent::default()
    })
}
