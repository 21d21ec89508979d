//! Catalog listings of courses and tracks
//!
//! The [`Catalog`] trait is the seam the orchestrator fetches listings
//! through. [`PlatformClient`] implements it by scraping the profile and
//! track pages and by reading the campus API course index.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

use crate::app::client::{Endpoints, PlatformClient};
use crate::app::models::{number_items, CatalogItem, CourseSummary, ListMode};
use crate::constants::selectors;
use crate::errors::{CatalogError, CatalogResult};

/// Source of catalog listings
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch the listing for `mode`, with ids unique within the result
    async fn list(&self, mode: ListMode) -> CatalogResult<Vec<CatalogItem>>;
}

/// CSS selectors locating catalog cards on a page
#[derive(Debug, Clone, Copy)]
pub struct BlockSelectors {
    pub block: &'static str,
    pub link: &'static str,
}

impl BlockSelectors {
    pub const COURSES: BlockSelectors = BlockSelectors {
        block: selectors::COURSE_BLOCK,
        link: selectors::COURSE_LINK,
    };

    pub const TRACKS: BlockSelectors = BlockSelectors {
        block: selectors::TRACK_BLOCK,
        link: selectors::TRACK_LINK,
    };
}

#[async_trait]
impl Catalog for PlatformClient {
    async fn list(&self, mode: ListMode) -> CatalogResult<Vec<CatalogItem>> {
        let endpoints = self.endpoints();

        let entries = match mode {
            ListMode::CompletedCourses | ListMode::CompletedTracks => {
                let url = endpoints
                    .profile(self.session().slug())
                    .map_err(|e| invalid_url("profile", e))?;
                tracing::info!("Fetching completed {} from {}", mode.kind().plural(), url);

                let html = self.http().get_page::<CatalogError>(&url).await?;
                let selectors = if mode == ListMode::CompletedCourses {
                    BlockSelectors::COURSES
                } else {
                    BlockSelectors::TRACKS
                };
                parse_blocks(&html, selectors, endpoints)?
            }
            ListMode::AllTracks => {
                let url = endpoints
                    .track_catalog()
                    .map_err(|e| invalid_url("tracks", e))?;
                tracing::info!("Fetching track catalog from {}", url);

                let html = self.http().get_page::<CatalogError>(&url).await?;
                parse_blocks(&html, BlockSelectors::TRACKS, endpoints)?
            }
            ListMode::AllCourses => {
                let url = endpoints
                    .course_index()
                    .map_err(|e| invalid_url("courses", e))?;
                tracing::info!("Fetching course index from {}", url);

                let courses: Vec<CourseSummary> = self
                    .http()
                    .get_json::<_, CatalogError>(&url)
                    .await?;
                course_entries(courses, endpoints)?
            }
        };

        tracing::debug!("Listing {} returned {} items", mode, entries.len());
        Ok(number_items(entries))
    }
}

fn invalid_url(what: &str, error: url::ParseError) -> CatalogError {
    CatalogError::InvalidUrl {
        url: what.to_string(),
        error: error.to_string(),
    }
}

fn parse_selector(selector: &str) -> CatalogResult<Selector> {
    Selector::parse(selector).map_err(|_| CatalogError::InvalidSelector {
        selector: selector.to_string(),
    })
}

/// Text content of an element with whitespace collapsed
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extracts `(name, absolute link)` pairs from catalog cards in page order
///
/// Cards without a title, a link, or with an unresolvable link are skipped.
pub fn parse_blocks(
    html: &str,
    selectors: BlockSelectors,
    endpoints: &Endpoints,
) -> CatalogResult<Vec<(String, String)>> {
    let document = Html::parse_document(html);
    let block_selector = parse_selector(selectors.block)?;
    let link_selector = parse_selector(selectors.link)?;
    let title_selector = parse_selector(selectors::BLOCK_TITLE)?;

    let mut entries = Vec::new();
    for block in document.select(&block_selector) {
        let title = block
            .select(&title_selector)
            .next()
            .map(element_text)
            .filter(|title| !title.is_empty());
        let href = block
            .select(&link_selector)
            .next()
            .and_then(|link| link.value().attr("href"));

        let (Some(title), Some(href)) = (title, href) else {
            tracing::debug!("Skipping catalog card without title or link");
            continue;
        };

        match endpoints.resolve_site_link(href) {
            Ok(url) => entries.push((title, url.to_string())),
            Err(e) => tracing::debug!("Skipping catalog card with bad link {}: {}", href, e),
        }
    }

    Ok(entries)
}

/// Maps the campus API course index to `(title, course page link)` pairs
pub fn course_entries(
    courses: Vec<CourseSummary>,
    endpoints: &Endpoints,
) -> CatalogResult<Vec<(String, String)>> {
    courses
        .into_iter()
        .map(|course| {
            endpoints
                .course_page(&course.slug)
                .map(|url| (course.title, url.to_string()))
                .map_err(|e| invalid_url(&course.slug, e))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::client::ApiConfig;

    fn endpoints() -> Endpoints {
        ApiConfig::default().endpoints().unwrap()
    }

    const PROFILE_HTML: &str = r#"
        <html><body>
          <section>
            <div class="course-block">
              <h4>  Introduction to
                Python </h4>
              <a class="course-block__link" href="/courses/intro-to-python">Continue</a>
            </div>
            <div class="course-block">
              <h4>Missing link</h4>
            </div>
            <div class="course-block">
              <h4>Joining Data with pandas</h4>
              <a class="course-block__link" href="https://www.datacamp.com/courses/joining-data-with-pandas">Replay</a>
            </div>
          </section>
          <section>
            <div class="track-block">
              <h4>Data Scientist with Python</h4>
              <a class="track-block__link" href="/tracks/data-scientist-with-python">View</a>
            </div>
          </section>
        </body></html>
    "#;

    #[test]
    fn test_parse_course_blocks() {
        let entries = parse_blocks(PROFILE_HTML, BlockSelectors::COURSES, &endpoints()).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "Introduction to Python");
        assert_eq!(
            entries[0].1,
            "https://www.datacamp.com/courses/intro-to-python"
        );
        assert_eq!(entries[1].0, "Joining Data with pandas");
    }

    #[test]
    fn test_parse_track_blocks() {
        let entries = parse_blocks(PROFILE_HTML, BlockSelectors::TRACKS, &endpoints()).unwrap();

        assert_eq!(
            entries,
            vec![(
                "Data Scientist with Python".to_string(),
                "https://www.datacamp.com/tracks/data-scientist-with-python".to_string()
            )]
        );
    }

    #[test]
    fn test_parse_blocks_empty_page() {
        let entries =
            parse_blocks("<html><body></body></html>", BlockSelectors::TRACKS, &endpoints())
                .unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_course_entries() {
        let courses = vec![
            CourseSummary {
                id: 735,
                title: "Introduction to Python".to_string(),
                slug: "intro-to-python-for-data-science".to_string(),
            },
            CourseSummary {
                id: 799,
                title: "Intermediate Python".to_string(),
                slug: "intermediate-python".to_string(),
            },
        ];

        let items = number_items(course_entries(courses, &endpoints()).unwrap());
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].id, 2);
        assert_eq!(
            items[1].link,
            "https://www.datacamp.com/courses/intermediate-python"
        );
    }
}
