//! Data models for DataCamp Fetcher
//!
//! This module defines the core data structures used throughout the application:
//! catalog items, listing modes, download flags, and the payloads returned by the
//! DataCamp campus and projector APIs.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::files;
use crate::errors::SelectionError;

/// Kind of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CatalogKind {
    /// A single learning unit with videos, exercises and datasets
    Course,
    /// A curated, ordered group of courses
    Track,
}

impl CatalogKind {
    /// Plural noun used in user-facing notices
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Course => "courses",
            Self::Track => "tracks",
        }
    }
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Course => write!(f, "course"),
            Self::Track => write!(f, "track"),
        }
    }
}

/// Which listing to fetch, as given by `--list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListMode {
    /// `T`: tracks the user completed
    CompletedTracks,
    /// `C`: courses the user completed
    CompletedCourses,
    /// `TA`: every track in the catalog
    AllTracks,
    /// `CA`: every course in the catalog
    AllCourses,
}

impl ListMode {
    /// Kind of item this listing produces
    pub fn kind(&self) -> CatalogKind {
        match self {
            Self::CompletedTracks | Self::AllTracks => CatalogKind::Track,
            Self::CompletedCourses | Self::AllCourses => CatalogKind::Course,
        }
    }

    /// Whether the listing is restricted to completed items
    pub fn completed_only(&self) -> bool {
        matches!(self, Self::CompletedTracks | Self::CompletedCourses)
    }

    /// Command-line code of this mode
    pub fn code(&self) -> &'static str {
        match self {
            Self::CompletedTracks => "T",
            Self::CompletedCourses => "C",
            Self::AllTracks => "TA",
            Self::AllCourses => "CA",
        }
    }

    /// Notice printed when the listing is empty
    pub fn empty_notice(&self) -> String {
        if self.completed_only() {
            format!("No completed {} found!", self.kind().plural())
        } else {
            format!("No {} found!", self.kind().plural())
        }
    }
}

impl FromStr for ListMode {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "T" => Ok(Self::CompletedTracks),
            "C" => Ok(Self::CompletedCourses),
            "TA" => Ok(Self::AllTracks),
            "CA" => Ok(Self::AllCourses),
            other => Err(SelectionError::InvalidListMode {
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ListMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One entry of a catalog listing
///
/// Ids are unique within a single listing fetch; they are assigned in
/// listing order starting from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u32,
    pub name: String,
    /// Opaque resource locator handed to the downloader
    pub link: String,
}

impl CatalogItem {
    pub fn new(id: u32, name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            link: link.into(),
        }
    }
}

/// Assign sequential ids to `(name, link)` pairs in order
pub fn number_items(entries: Vec<(String, String)>) -> Vec<CatalogItem> {
    entries
        .into_iter()
        .zip(1u32..)
        .map(|((name, link), id)| CatalogItem { id, name, link })
        .collect()
}

/// Content types to transfer for each dispatched item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DownloadFlags {
    pub video: bool,
    pub exercise: bool,
    pub dataset: bool,
}

impl DownloadFlags {
    pub fn new(video: bool, exercise: bool, dataset: bool) -> Self {
        Self {
            video,
            exercise,
            dataset,
        }
    }

    /// Every content type selected
    pub fn all() -> Self {
        Self::new(true, true, true)
    }

    /// Flags actually used for dispatch: `all` overrides the individual selectors
    pub fn effective(self, all: bool) -> Self {
        if all {
            Self::all()
        } else {
            self
        }
    }

    /// Whether nothing would be transferred
    pub fn is_empty(&self) -> bool {
        !(self.video || self.exercise || self.dataset)
    }
}

/// Signed-in user as reported by the platform
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub slug: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl UserProfile {
    /// Name shown to the user, falling back to the profile slug
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            _ => self.slug.clone(),
        }
    }
}

/// Course summary from the campus API course index
#[derive(Debug, Clone, Deserialize)]
pub struct CourseSummary {
    pub id: u64,
    pub title: String,
    pub slug: String,
}

/// Full course structure from the campus API
#[derive(Debug, Clone, Deserialize)]
pub struct CourseDetails {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub datasets: Vec<DatasetAsset>,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

/// Downloadable dataset attached to a course
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetAsset {
    #[serde(default)]
    pub name: Option<String>,
    pub asset_url: String,
}

impl DatasetAsset {
    /// File name for the dataset: its name, else the last URL segment
    pub fn file_name(&self) -> String {
        let from_url = self
            .asset_url
            .split('?')
            .next()
            .and_then(|path| path.rsplit('/').next())
            .filter(|segment| !segment.is_empty())
            .unwrap_or("dataset");

        match &self.name {
            Some(name) if !name.trim().is_empty() => {
                let name = sanitize_file_name(name);
                // Keep the original extension when the display name has none
                match from_url.rsplit_once('.') {
                    Some((_, ext)) if !name.contains('.') => format!("{}.{}", name, ext),
                    _ => name,
                }
            }
            _ => sanitize_file_name(from_url),
        }
    }
}

/// Chapter of a course
#[derive(Debug, Clone, Deserialize)]
pub struct Chapter {
    pub id: u64,
    pub number: u32,
    pub title: String,
}

/// Exercise of a chapter
#[derive(Debug, Clone, Deserialize)]
pub struct Exercise {
    pub number: u32,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub sample_code: Option<String>,
    #[serde(default)]
    pub solution: Option<String>,
    #[serde(default)]
    pub projector_key: Option<String>,
}

impl Exercise {
    pub fn is_video(&self) -> bool {
        self.kind == crate::constants::exercises::VIDEO_EXERCISE_TYPE
    }
}

/// Video metadata from the projector service
#[derive(Debug, Clone, Deserialize)]
pub struct VideoInfo {
    pub video_mp4_link: Option<String>,
}

/// Turn a title into a safe single path component
pub fn sanitize_file_name(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| {
            if files::RESERVED_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");
    let trimmed = collapsed.trim_matches('.').trim();

    if trimmed.is_empty() {
        "untitled".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_mode_codes() {
        assert_eq!("T".parse::<ListMode>().unwrap(), ListMode::CompletedTracks);
        assert_eq!("C".parse::<ListMode>().unwrap(), ListMode::CompletedCourses);
        assert_eq!("TA".parse::<ListMode>().unwrap(), ListMode::AllTracks);
        assert_eq!("CA".parse::<ListMode>().unwrap(), ListMode::AllCourses);

        let err = "t".parse::<ListMode>().unwrap_err();
        assert_eq!(
            err,
            SelectionError::InvalidListMode {
                value: "t".to_string()
            }
        );
    }

    #[test]
    fn test_list_mode_kind() {
        assert_eq!(ListMode::CompletedTracks.kind(), CatalogKind::Track);
        assert_eq!(ListMode::AllCourses.kind(), CatalogKind::Course);
        assert!(ListMode::CompletedCourses.completed_only());
        assert!(!ListMode::AllTracks.completed_only());
        assert_eq!(
            ListMode::CompletedCourses.empty_notice(),
            "No completed courses found!"
        );
        assert_eq!(ListMode::AllTracks.empty_notice(), "No tracks found!");
    }

    #[test]
    fn test_effective_flags() {
        let flags = DownloadFlags::new(true, false, false);
        assert_eq!(flags.effective(false), flags);
        assert_eq!(flags.effective(true), DownloadFlags::all());
        assert!(DownloadFlags::default().is_empty());
        assert!(!flags.is_empty());
    }

    #[test]
    fn test_number_items() {
        let items = number_items(vec![
            ("Intro".to_string(), "L1".to_string()),
            ("Advanced".to_string(), "L2".to_string()),
        ]);
        assert_eq!(items[0], CatalogItem::new(1, "Intro", "L1"));
        assert_eq!(items[1], CatalogItem::new(2, "Advanced", "L2"));
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("Intro to Python"), "Intro to Python");
        assert_eq!(sanitize_file_name("A/B: C?"), "A_B_ C_");
        assert_eq!(sanitize_file_name("  spaced   out  "), "spaced out");
        assert_eq!(sanitize_file_name(".."), "untitled");
        assert_eq!(sanitize_file_name(""), "untitled");
    }

    #[test]
    fn test_dataset_file_name() {
        let named = DatasetAsset {
            name: Some("Gapminder".to_string()),
            asset_url: "https://assets.example.com/data/gapminder.csv?v=2".to_string(),
        };
        assert_eq!(named.file_name(), "Gapminder.csv");

        let unnamed = DatasetAsset {
            name: None,
            asset_url: "https://assets.example.com/data/flights.xlsx".to_string(),
        };
        assert_eq!(unnamed.file_name(), "flights.xlsx");
    }

    #[test]
    fn test_user_display_name() {
        let user = UserProfile {
            id: 1,
            slug: "jdoe".to_string(),
            first_name: Some("Jo".to_string()),
            last_name: None,
        };
        assert_eq!(user.display_name(), "Jo");

        let anonymous = UserProfile {
            first_name: None,
            ..user
        };
        assert_eq!(anonymous.display_name(), "jdoe");
    }
}
