//! The site summary document
//!
//! Field names are camelCase on the wire so the JSON matches what the landing
//! page's consumers already read.

use serde::{Deserialize, Serialize};

use crate::error::SiteResult;

/// Brand name used when the page has no brand word
pub const DEFAULT_BRAND_NAME: &str = "SUNTRAM Digital";

/// Logo path used when the page has no brand logo
pub const DEFAULT_LOGO: &str = "assets/logo-suntram.png";

/// Language tag used when `<html>` carries no `lang`
pub const DEFAULT_LANGUAGE: &str = "es";

/// Structured summary of the landing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSummary {
    /// Always `true` for a successful extraction
    pub ok: bool,
    /// RFC 3339 UTC time of extraction
    pub generated_at: String,
    /// Brand and document metadata
    pub site: SiteInfo,
    /// Social (OpenGraph) metadata
    pub open_graph: OpenGraph,
    /// Primary navigation, in page order
    pub navigation: Vec<Link>,
    /// Hero block
    pub hero: Hero,
    /// Outline of the identified sections inside `<main>`
    pub sections: Vec<SectionOutline>,
    /// Service cards
    pub services: Vec<Service>,
    /// AI solution cards
    pub ai_solutions: Vec<AiSolution>,
    /// Process steps
    pub process: Vec<ProcessStep>,
    /// Direct contact links
    pub contact: Contact,
    /// Footer links
    pub footer_links: Vec<Link>,
    /// Where this summary came from
    pub source: SourceInfo,
}

impl SiteSummary {
    /// Encode as JSON, indented with two spaces when `pretty` is set
    pub fn to_json(&self, pretty: bool) -> SiteResult<String> {
        let body = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(body)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteInfo {
    pub name: String,
    pub title: String,
    pub description: String,
    pub logo: String,
    pub language: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub og_type: String,
}

/// A labelled hyperlink
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub kicker: String,
    pub headline: String,
    pub lead: String,
    pub pillars: Vec<String>,
    pub metrics: Vec<Metric>,
}

/// Headline number shown in the hero, e.g. `{ "value": "120", "label": "Proyectos" }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionOutline {
    pub id: String,
    pub title: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Value of the card's `data-service` attribute
    pub key: String,
    pub name: String,
    pub description: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiSolution {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStep {
    pub step: String,
    pub title: String,
    pub description: String,
}

/// Raw `mailto:` and `tel:` URIs from the contact section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    pub tel: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    pub index_html: String,
    pub endpoint: String,
    pub notes: String,
}

impl Default for SourceInfo {
    fn default() -> Self {
        Self {
            index_html: "/index.html".to_string(),
            endpoint: "/site".to_string(),
            notes: "Auto-generated summary from index.html for AI consumption.".to_string(),
        }
    }
}
