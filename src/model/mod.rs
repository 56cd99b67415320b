//! # Resume Document Model
//!
//! The input representation for the pagination pipeline. A resume is a set
//! of scalar contact fields plus ordered, typed collections, an arbitrary
//! list of custom sections, and a `sectionOrder` that decides which of them
//! are rendered and in what order.
//!
//! The model is pure data. Nothing in the pipeline mutates it: a
//! [`ResumeDocument`] is an immutable snapshot for the duration of one
//! pagination pass.

use serde::{Deserialize, Deserializer, Serialize};

/// Section keys starting with this marker resolve against `customSections`.
pub const CUSTOM_SECTION_PREFIX: &str = "custom-";

/// A complete resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeDocument {
    pub full_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub linkedin: String,
    pub github: String,
    pub summary: String,
    /// Data URI or URL of a portrait. Rendered by themes that show one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,

    pub experience: Vec<ExperienceItem>,
    pub education: Vec<EducationItem>,
    pub skills: Vec<SkillCategory>,
    pub projects: Vec<ProjectItem>,
    pub certifications: Vec<CertificationItem>,
    pub languages: Vec<LanguageItem>,
    pub volunteering: Vec<VolunteeringItem>,
    pub awards: Vec<AwardItem>,
    /// Accepts either a list or a single comma-separated string.
    #[serde(deserialize_with = "comma_list")]
    pub interests: Vec<String>,
    pub custom_sections: Vec<CustomSection>,
    pub references: String,

    /// Render order of sections. Keys are not checked for uniqueness.
    pub section_order: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceItem {
    pub id: String,
    pub company: String,
    pub title: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    #[serde(deserialize_with = "one_or_many")]
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationItem {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
}

/// A skill with a 1-5 proficiency level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSkill")]
pub struct SkillItem {
    pub name: String,
    pub level: u8,
}

/// Skills may be written as bare names or as `{name, level}` objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSkill {
    Plain(String),
    Rated {
        name: String,
        #[serde(default = "default_level")]
        level: u8,
    },
}

fn default_level() -> u8 {
    3
}

impl From<RawSkill> for SkillItem {
    fn from(raw: RawSkill) -> Self {
        match raw {
            RawSkill::Plain(name) => SkillItem {
                name,
                level: default_level(),
            },
            RawSkill::Rated { name, level } => SkillItem {
                name,
                level: level.clamp(1, 5),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillCategory {
    pub name: String,
    pub items: Vec<SkillItem>,
    pub show_level: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectItem {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "one_or_many")]
    pub description: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificationItem {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LanguageItem {
    pub id: String,
    pub language: String,
    /// Free-form, e.g. "Native", "B2", "Fluent".
    pub proficiency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolunteeringItem {
    pub id: String,
    pub organization: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    #[serde(deserialize_with = "one_or_many")]
    pub description: Vec<String>,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AwardItem {
    pub id: String,
    pub title: String,
    pub issuer: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomSectionItem {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub description: Vec<String>,
}

/// A user-defined section. `id` must appear in `sectionOrder` for the
/// section to render, and carries the [`CUSTOM_SECTION_PREFIX`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomSection {
    pub id: String,
    pub title: String,
    pub items: Vec<CustomSectionItem>,
}

/// A parsed `sectionOrder` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKey<'a> {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Languages,
    Volunteering,
    Awards,
    Interests,
    References,
    /// A `custom-*` key, kept whole so it can be matched against ids.
    Custom(&'a str),
    /// Anything else. Ignored by every theme.
    Unknown(&'a str),
}

impl<'a> SectionKey<'a> {
    pub fn parse(key: &'a str) -> Self {
        match key {
            "summary" => SectionKey::Summary,
            "experience" => SectionKey::Experience,
            "education" => SectionKey::Education,
            "skills" => SectionKey::Skills,
            "projects" => SectionKey::Projects,
            "certifications" => SectionKey::Certifications,
            "languages" => SectionKey::Languages,
            "volunteering" => SectionKey::Volunteering,
            "awards" => SectionKey::Awards,
            "interests" => SectionKey::Interests,
            "references" => SectionKey::References,
            k if k.starts_with(CUSTOM_SECTION_PREFIX) => SectionKey::Custom(k),
            k => SectionKey::Unknown(k),
        }
    }
}

impl ResumeDocument {
    /// Resolve a custom section by its `sectionOrder` key.
    pub fn custom_section(&self, id: &str) -> Option<&CustomSection> {
        self.custom_sections.iter().find(|s| s.id == id)
    }

    /// Whether the section behind `key` has anything to render.
    ///
    /// Blank scalar fields and empty collections are skipped entirely, as are
    /// custom keys with no matching entry and unrecognised keys.
    pub fn has_content(&self, key: SectionKey<'_>) -> bool {
        match key {
            SectionKey::Summary => !self.summary.trim().is_empty(),
            SectionKey::Experience => !self.experience.is_empty(),
            SectionKey::Education => !self.education.is_empty(),
            SectionKey::Skills => !self.skills.is_empty(),
            SectionKey::Projects => !self.projects.is_empty(),
            SectionKey::Certifications => !self.certifications.is_empty(),
            SectionKey::Languages => !self.languages.is_empty(),
            SectionKey::Volunteering => !self.volunteering.is_empty(),
            SectionKey::Awards => !self.awards.is_empty(),
            SectionKey::Interests => !self.interests.is_empty(),
            SectionKey::References => !self.references.trim().is_empty(),
            SectionKey::Custom(id) => self.custom_section(id).is_some(),
            SectionKey::Unknown(_) => false,
        }
    }
}

/// Strip a leading `http://` or `https://` for display.
pub fn display_url(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

/// Turn a user-entered link into an absolute href.
pub fn href_for(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(s)) if s.trim().is_empty() => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
    })
}

fn comma_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = one_or_many(deserializer)?;
    Ok(items
        .iter()
        .flat_map(|s| s.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect())
}

// ── Physical page geometry ─────────────────────────────────────────

/// CSS pixels per millimetre at 96 dpi.
pub const PX_PER_MM: f64 = 96.0 / 25.4;

/// Convert millimetres to CSS pixels.
pub fn mm(v: f64) -> f64 {
    v * PX_PER_MM
}

pub const DEFAULT_PAGE_WIDTH_MM: f64 = 210.0;
pub const DEFAULT_PAGE_HEIGHT_MM: f64 = 297.0;
pub const DEFAULT_PAGE_PADDING_MM: f64 = 15.0;
pub const DEFAULT_FOOTER_HEIGHT_MM: f64 = 15.0;
/// Subtracted from the nominal usable height to absorb measurement drift.
/// Leaves roughly 850px of content per A4 page.
pub const DEFAULT_SAFETY_MARGIN_PX: f64 = 102.4;
/// Space that must remain below a section header for it to start on a page.
pub const DEFAULT_HEADER_LOOKAHEAD_PX: f64 = 80.0;

/// Physical page dimensions in CSS pixels, shared by the measurement surface
/// and the page renderer so both lay content out at the same width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    /// Padding on all four sides of the content area.
    pub padding: f64,
    /// Height reserved below the content area for the page counter.
    pub footer_height: f64,
    pub safety_margin: f64,
    pub header_lookahead: f64,
    /// Move a header that would end a page over to the next one.
    pub carry_orphaned_headers: bool,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: mm(DEFAULT_PAGE_WIDTH_MM),
            height: mm(DEFAULT_PAGE_HEIGHT_MM),
            padding: mm(DEFAULT_PAGE_PADDING_MM),
            footer_height: mm(DEFAULT_FOOTER_HEIGHT_MM),
            safety_margin: DEFAULT_SAFETY_MARGIN_PX,
            header_lookahead: DEFAULT_HEADER_LOOKAHEAD_PX,
            carry_orphaned_headers: true,
        }
    }
}

impl PageGeometry {
    /// Width available to blocks inside the padded content area.
    pub fn content_width(&self) -> f64 {
        self.width - 2.0 * self.padding
    }

    /// Height of the content area as laid out on the physical page.
    pub fn content_area_height(&self) -> f64 {
        self.height - 2.0 * self.padding - self.footer_height
    }

    /// Usable content height per page: the content area minus the safety margin.
    pub fn max_content_height(&self) -> f64 {
        self.content_area_height() - self.safety_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_json_with_defaults() {
        let doc: ResumeDocument = serde_json::from_str(r#"{"fullName": "Ada"}"#).unwrap();
        assert_eq!(doc.full_name, "Ada");
        assert!(doc.section_order.is_empty());
        assert!(doc.profile_image.is_none());
    }

    #[test]
    fn interests_accept_comma_string() {
        let doc: ResumeDocument =
            serde_json::from_str(r#"{"interests": "chess, climbing ,, jazz"}"#).unwrap();
        assert_eq!(doc.interests, vec!["chess", "climbing", "jazz"]);
    }

    #[test]
    fn interests_accept_list() {
        let doc: ResumeDocument = serde_json::from_str(r#"{"interests": ["a", "b"]}"#).unwrap();
        assert_eq!(doc.interests, vec!["a", "b"]);
    }

    #[test]
    fn blank_interests_string_is_empty() {
        let doc: ResumeDocument = serde_json::from_str(r#"{"interests": "  "}"#).unwrap();
        assert!(doc.interests.is_empty());
    }

    #[test]
    fn skills_accept_plain_names_and_clamp_levels() {
        let cat: SkillCategory = serde_json::from_str(
            r#"{"name": "Tech", "items": ["Rust", {"name": "Go", "level": 9}, {"name": "C"}]}"#,
        )
        .unwrap();
        assert_eq!(cat.items[0], SkillItem { name: "Rust".into(), level: 3 });
        assert_eq!(cat.items[1].level, 5);
        assert_eq!(cat.items[2].level, 3);
    }

    #[test]
    fn description_accepts_single_string() {
        let vol: VolunteeringItem =
            serde_json::from_str(r#"{"id": "v1", "description": "Helped out"}"#).unwrap();
        assert_eq!(vol.description, vec!["Helped out"]);
    }

    #[test]
    fn section_keys_parse() {
        assert_eq!(SectionKey::parse("summary"), SectionKey::Summary);
        assert_eq!(SectionKey::parse("custom-pubs"), SectionKey::Custom("custom-pubs"));
        assert_eq!(SectionKey::parse("hobbies"), SectionKey::Unknown("hobbies"));
    }

    #[test]
    fn dangling_custom_key_has_no_content() {
        let doc = ResumeDocument {
            section_order: vec!["custom-missing".into()],
            ..Default::default()
        };
        assert!(!doc.has_content(SectionKey::Custom("custom-missing")));
    }

    #[test]
    fn blank_summary_has_no_content() {
        let doc = ResumeDocument {
            summary: "   ".into(),
            ..Default::default()
        };
        assert!(!doc.has_content(SectionKey::Summary));
    }

    #[test]
    fn url_helpers() {
        assert_eq!(display_url("https://example.com"), "example.com");
        assert_eq!(display_url("linkedin.com/in/x"), "linkedin.com/in/x");
        assert_eq!(href_for("example.com"), "https://example.com");
        assert_eq!(href_for("http://example.com"), "http://example.com");
    }

    #[test]
    fn default_geometry_leaves_about_850px() {
        let g = PageGeometry::default();
        assert!((g.max_content_height() - 850.0).abs() < 1.0);
        assert!((g.content_width() - 680.3).abs() < 0.1);
    }
}
