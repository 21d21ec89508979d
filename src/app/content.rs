//! Course and track content downloads
//!
//! The [`ContentDownloader`] trait is the seam the orchestrator dispatches
//! selections through. [`PlatformClient`] implements it against the campus
//! API and projector service, writing one folder per course:
//!
//! ```text
//! <destination>/<course title>/
//!     Datasets/<dataset file>
//!     Exercises/<chapter number>. <chapter title>.md
//!     Videos/<chapter>.<exercise> <exercise title>.mp4
//! ```
//!
//! Tracks are downloaded as a folder named after the track holding one course
//! folder per course, processed sequentially.

use std::collections::HashSet;
use std::fmt::{self, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use scraper::{Html, Selector};
use url::Url;

use crate::app::catalog::element_text;
use crate::app::client::download::write_text_file;
use crate::app::client::{Endpoints, PlatformClient};
use crate::app::models::{
    sanitize_file_name, CatalogKind, Chapter, CourseDetails, DownloadFlags, Exercise, VideoInfo,
};
use crate::constants::{files, selectors};
use crate::errors::{DownloadError, DownloadResult};

/// Transfers the materials of a course or track to a local path
#[async_trait]
pub trait ContentDownloader: Send + Sync {
    async fn download_course(
        &self,
        link: &str,
        destination: &Path,
        flags: DownloadFlags,
    ) -> DownloadResult<()>;

    async fn download_track(
        &self,
        link: &str,
        destination: &Path,
        flags: DownloadFlags,
    ) -> DownloadResult<()>;

    /// Dispatch on the kind of catalog item
    async fn download(
        &self,
        kind: CatalogKind,
        link: &str,
        destination: &Path,
        flags: DownloadFlags,
    ) -> DownloadResult<()> {
        match kind {
            CatalogKind::Course => self.download_course(link, destination, flags).await,
            CatalogKind::Track => self.download_track(link, destination, flags).await,
        }
    }
}

#[async_trait]
impl ContentDownloader for PlatformClient {
    async fn download_course(
        &self,
        link: &str,
        destination: &Path,
        flags: DownloadFlags,
    ) -> DownloadResult<()> {
        if flags.is_empty() {
            tracing::warn!(
                "No content type selected for {}; pass --video, --exercise, --dataset or --all",
                link
            );
            return Ok(());
        }

        let slug = course_slug(link)?;
        let endpoints = self.endpoints();
        let details_url = endpoints
            .course_details(&slug)
            .map_err(|e| invalid_url(&slug, e))?;
        let details: CourseDetails = self
            .http()
            .get_json::<_, DownloadError>(&details_url)
            .await?;

        let course_dir = destination.join(sanitize_file_name(&details.title));
        tracing::info!(
            "Downloading course {} ({}) into {}",
            details.title,
            details.id,
            course_dir.display()
        );

        if flags.dataset {
            for asset in &details.datasets {
                let url = endpoints
                    .resolve_site_link(&asset.asset_url)
                    .map_err(|e| invalid_url(&asset.asset_url, e))?;
                let target = course_dir
                    .join(files::DATASETS_DIR)
                    .join(asset.file_name());
                self.download_file(&url, &target).await?;
            }
        }

        if flags.exercise || flags.video {
            for chapter in &details.chapters {
                let exercises_url = endpoints
                    .chapter_exercises(details.id, chapter.id)
                    .map_err(|e| invalid_url(&chapter.title, e))?;
                let exercises: Vec<Exercise> = self
                    .http()
                    .get_json::<_, DownloadError>(&exercises_url)
                    .await?;

                if flags.exercise && exercises.iter().any(|e| !e.is_video()) {
                    let target = course_dir
                        .join(files::EXERCISES_DIR)
                        .join(chapter_file_name(chapter));
                    write_text_file(&target, &render_chapter(chapter, &exercises)).await?;
                }

                if flags.video {
                    self.download_chapter_videos(endpoints, chapter, &exercises, &course_dir)
                        .await?;
                }
            }
        }

        Ok(())
    }

    async fn download_track(
        &self,
        link: &str,
        destination: &Path,
        flags: DownloadFlags,
    ) -> DownloadResult<()> {
        let url = Url::parse(link).map_err(|e| invalid_url(link, e))?;
        let html = self.http().get_page::<DownloadError>(&url).await?;
        let page = parse_track_page(&html, self.endpoints());

        let title = match page.title {
            Some(title) => title,
            None => course_slug(link)?,
        };
        if page.course_links.is_empty() {
            return Err(DownloadError::MissingContent {
                what: format!("course links on track page {}", link),
            });
        }

        let track_dir = destination.join(sanitize_file_name(&title));
        tracing::info!(
            "Downloading track {} ({} courses) into {}",
            title,
            page.course_links.len(),
            track_dir.display()
        );

        for course_link in &page.course_links {
            self.download_course(course_link, &track_dir, flags).await?;
        }

        Ok(())
    }
}

impl PlatformClient {
    async fn download_chapter_videos(
        &self,
        endpoints: &Endpoints,
        chapter: &Chapter,
        exercises: &[Exercise],
        course_dir: &Path,
    ) -> DownloadResult<()> {
        for exercise in exercises.iter().filter(|e| e.is_video()) {
            let Some(key) = exercise.projector_key.as_deref() else {
                tracing::warn!("Video exercise '{}' has no projector key", exercise.title);
                continue;
            };

            let info_url = endpoints.video(key).map_err(|e| invalid_url(key, e))?;
            let info: VideoInfo = self
                .http()
                .get_json::<_, DownloadError>(&info_url)
                .await?;

            let Some(mp4) = info.video_mp4_link else {
                tracing::warn!("No mp4 rendition for video '{}'", exercise.title);
                continue;
            };

            let video_url = endpoints
                .resolve_site_link(&mp4)
                .map_err(|e| invalid_url(&mp4, e))?;
            let target = video_path(course_dir, chapter, exercise);
            self.download_file(&video_url, &target).await?;
        }

        Ok(())
    }
}

fn invalid_url(url: &str, error: url::ParseError) -> DownloadError {
    DownloadError::InvalidUrl {
        url: url.to_string(),
        error: error.to_string(),
    }
}

/// Last non-empty path segment of a course or track link
pub fn course_slug(link: &str) -> DownloadResult<String> {
    let url = Url::parse(link).map_err(|e| invalid_url(link, e))?;
    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(str::to_string)
        .ok_or_else(|| DownloadError::InvalidUrl {
            url: link.to_string(),
            error: "link has no path".to_string(),
        })
}

/// Title and course links scraped from a track page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackPage {
    pub title: Option<String>,
    /// Absolute course links without fragments, deduplicated in document order
    pub course_links: Vec<String>,
}

/// Parses a track page
pub fn parse_track_page(html: &str, endpoints: &Endpoints) -> TrackPage {
    let document = Html::parse_document(html);

    let title = Selector::parse(selectors::TRACK_PAGE_TITLE)
        .ok()
        .and_then(|selector| document.select(&selector).next().map(element_text))
        .filter(|title| !title.is_empty());

    let mut seen = HashSet::new();
    let mut course_links = Vec::new();
    if let Ok(selector) = Selector::parse(selectors::TRACK_PAGE_COURSE_LINK) {
        for href in document
            .select(&selector)
            .filter_map(|link| link.value().attr("href"))
        {
            if let Ok(mut url) = endpoints.resolve_site_link(href) {
                url.set_fragment(None);
                let url = url.to_string();
                if seen.insert(url.clone()) {
                    course_links.push(url);
                }
            }
        }
    }

    TrackPage {
        title,
        course_links,
    }
}

fn chapter_file_name(chapter: &Chapter) -> String {
    format!("{}. {}.md", chapter.number, sanitize_file_name(&chapter.title))
}

fn video_path(course_dir: &Path, chapter: &Chapter, exercise: &Exercise) -> PathBuf {
    course_dir.join(files::VIDEOS_DIR).join(format!(
        "{}.{} {}.mp4",
        chapter.number,
        exercise.number,
        sanitize_file_name(&exercise.title)
    ))
}

/// Markdown write-up of the non-video exercises of a chapter
pub fn render_chapter(chapter: &Chapter, exercises: &[Exercise]) -> String {
    let mut out = String::new();
    // Writing into a String only fails if a Display impl does
    match write_chapter(&mut out, chapter, exercises) {
        Ok(()) => out,
        Err(fmt::Error) => String::new(),
    }
}

fn write_chapter(out: &mut impl Write, chapter: &Chapter, exercises: &[Exercise]) -> fmt::Result {
    writeln!(out, "# {}. {}", chapter.number, chapter.title)?;

    for exercise in exercises.iter().filter(|e| !e.is_video()) {
        write!(out, "\n## {}. {}\n", exercise.number, exercise.title)?;

        let sections = [
            ("Instructions", exercise.instructions.as_deref(), false),
            ("Sample code", exercise.sample_code.as_deref(), true),
            ("Solution", exercise.solution.as_deref(), true),
        ];
        for (heading, body, fenced) in sections {
            let Some(body) = body.map(str::trim).filter(|b| !b.is_empty()) else {
                continue;
            };
            write!(out, "\n### {}\n\n", heading)?;
            if fenced {
                writeln!(out, "```\n{}\n```", body)?;
            } else {
                writeln!(out, "{}", body)?;
            }
        }
    }

    Ok(())
}
