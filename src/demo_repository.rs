use std::thread;
use std::time::Duration;
use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::error::FetchError;
use crate::pagination::{PaginationCursors, REL_FIRST, REL_LAST, REL_NEXT, REL_PREV};
use crate::photo::{Photo, PhotoOwner, PhotoUrls};
use crate::repository::{CancellationToken, PhotoPage, PhotoQuery, PhotoRepository};

const DEFAULT_TOTAL_PAGES: u32 = 10;
const LATENCY_STEP: Duration = Duration::from_millis(10);

// 64-bit FNV-1a
const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

const PHOTOGRAPHERS: &[&str] = &[
    "Ansel Reyes", "Mira Okafor", "Tomas Lindqvist", "Hana Sato", "Priya Raman",
    "Luca Bianchi", "Ingrid Holm", "Kwame Mensah", "Sofia Duarte", "Yuki Tanaka",
];

// (width, height) presets covering portrait, square, landscape and panorama
const SHAPES: &[(u32, u32)] = &[
    (3000, 4500), (4000, 4000), (6000, 4000), (4000, 3000),
    (3456, 5184), (5472, 3648), (2400, 3600), (6000, 2500),
];

/// Offline photo source generating deterministic results.
///
/// Every (query, page) pair yields the same photos on every run and every
/// build, so the grid can be browsed without an access key.
pub struct DemoPhotoRepository {
    total_pages: u32,
    seed: u64,
    latency: Duration,
}

impl DemoPhotoRepository {
    pub fn new() -> Self {
        Self {
            total_pages: DEFAULT_TOTAL_PAGES,
            seed: 42, // Default seed for reproducibility
            latency: Duration::ZERO,
        }
    }

    pub fn with_config(total_pages: u32, seed: u64) -> Self {
        Self {
            total_pages: total_pages.max(1),
            seed,
            latency: Duration::ZERO,
        }
    }

    /// Adds an artificial delay to every request, honouring cancellation.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn simulate_latency(&self, token: &CancellationToken) -> Result<(), FetchError> {
        let mut remaining = self.latency;
        while !remaining.is_zero() {
            token.check()?;
            let step = remaining.min(LATENCY_STEP);
            thread::sleep(step);
            remaining -= step;
        }
        token.check()
    }

    fn rng_for(&self, query: &str, page: u32, index: u32) -> StdRng {
        StdRng::seed_from_u64(photo_seed(self.seed, query, page, index))
    }

    fn generate_photo(&self, query: &str, page: u32, index: u32) -> Photo {
        let mut rng = self.rng_for(query, page, index);
        let (width, height) = SHAPES[rng.gen_range(0..SHAPES.len())];
        let owner = PHOTOGRAPHERS[rng.gen_range(0..PHOTOGRAPHERS.len())];
        let days_ago = rng.gen_range(0..3650);

        let epoch = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).single().unwrap_or_else(Utc::now);
        let created_at = (epoch - ChronoDuration::days(days_ago)).to_rfc3339();

        let id = format!("demo-{}-{}-{}", page, index, query);
        let image_seed = format!("{}{}{}", query.replace(char::is_whitespace, "_"), page, index);
        let thumb_height = height * 400 / width.max(1);

        Photo {
            urls: PhotoUrls {
                small: format!("https://picsum.photos/seed/{}/400/{}", image_seed, thumb_height),
                full: format!("https://picsum.photos/seed/{}/{}/{}", image_seed, width / 2, height / 2),
            },
            user: PhotoOwner { name: owner.to_string() },
            description: format!("{} #{}", query, (page - 1) * 1000 + index + 1),
            alt_description: format!("demo photo of {}", query),
            created_at,
            width,
            height,
            id,
        }
    }

    fn cursors_for(&self, page: u32) -> PaginationCursors {
        let mut pairs = vec![(REL_FIRST, 1), (REL_LAST, self.total_pages)];
        if page > 1 {
            pairs.push((REL_PREV, page - 1));
        }
        if page < self.total_pages {
            pairs.push((REL_NEXT, page + 1));
        }
        PaginationCursors::from_pairs(pairs)
    }
}

/// Mixes the photo coordinates into `seed` with a fixed hash.
fn photo_seed(seed: u64, query: &str, page: u32, index: u32) -> u64 {
    let bytes = query
        .bytes()
        .chain([0xff])
        .chain(page.to_le_bytes())
        .chain(index.to_le_bytes());
    let hash = bytes.fold(FNV_OFFSET, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME));
    seed ^ hash
}

impl Default for DemoPhotoRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoRepository for DemoPhotoRepository {
    fn fetch_photos(&self, query: &PhotoQuery, token: &CancellationToken) -> Result<PhotoPage, FetchError> {
        self.simulate_latency(token)?;

        if query.page > self.total_pages {
            return Ok(PhotoPage {
                photos: Vec::new(),
                cursors: PaginationCursors::from_pairs([(REL_FIRST, 1), (REL_LAST, self.total_pages)]),
            });
        }

        let photos = (0..query.per_page)
            .map(|index| self.generate_photo(&query.text, query.page, index))
            .collect();

        Ok(PhotoPage {
            photos,
            cursors: self.cursors_for(query.page),
        })
    }

    fn fetch_photo_by_id(&self, id: &str, token: &CancellationToken) -> Result<Photo, FetchError> {
        self.simulate_latency(token)?;

        let not_found = || FetchError::Status {
            status: 404,
            messages: vec![format!("Couldn't find Photo {}", id)],
        };

        let mut parts = id.splitn(4, '-');
        if parts.next() != Some("demo") {
            return Err(not_found());
        }
        let page: u32 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(not_found)?;
        let index: u32 = parts.next().and_then(|i| i.parse().ok()).ok_or_else(not_found)?;
        let query = parts.next().ok_or_else(not_found)?;

        if page == 0 || page > self.total_pages {
            return Err(not_found());
        }

        Ok(self.generate_photo(query, page, index))
    }

    fn name(&self) -> &str {
        "Demo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;

    #[test]
    fn test_pages_are_deterministic() {
        let repo = DemoPhotoRepository::new();
        let token = CancellationToken::new();
        let query = PhotoQuery::new("cats", 2, &SearchConfig::default());

        let a = repo.fetch_photos(&query, &token).unwrap();
        let b = repo.fetch_photos(&query, &token).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.photos.len(), 30);
        assert_eq!(a.cursors.next(), Some(3));
        assert_eq!(a.cursors.prev(), Some(1));
    }

    #[test]
    fn test_last_page_has_no_next_cursor() {
        let repo = DemoPhotoRepository::with_config(3, 7);
        let token = CancellationToken::new();
        let query = PhotoQuery::new("dogs", 3, &SearchConfig::default());

        let page = repo.fetch_photos(&query, &token).unwrap();
        assert!(page.cursors.is_exhausted());
        assert_eq!(page.cursors.last(), Some(3));
    }

    #[test]
    fn test_photo_by_id_round_trips_through_search() {
        let repo = DemoPhotoRepository::new();
        let token = CancellationToken::new();
        let query = PhotoQuery::new("red panda", 1, &SearchConfig::default());

        let page = repo.fetch_photos(&query, &token).unwrap();
        let wanted = &page.photos[5];
        let found = repo.fetch_photo_by_id(&wanted.id, &token).unwrap();
        assert_eq!(&found, wanted);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let repo = DemoPhotoRepository::new();
        let token = CancellationToken::new();
        assert!(matches!(
            repo.fetch_photo_by_id("abc", &token),
            Err(FetchError::Status { status: 404, .. })
        ));
    }

    #[test]
    fn test_latency_respects_cancellation() {
        let repo = DemoPhotoRepository::new().with_latency(Duration::from_secs(5));
        let token = CancellationToken::new();
        token.cancel();
        let query = PhotoQuery::new("cats", 1, &SearchConfig::default());
        assert_eq!(repo.fetch_photos(&query, &token), Err(FetchError::Cancelled));
    }

    #[test]
    fn test_photo_seed_is_pinned() {
        assert_eq!(photo_seed(42, "cats", 2, 5), 0x839e_57cd_ec65_35c4);
        assert_ne!(photo_seed(42, "cats", 2, 5), photo_seed(42, "cats", 2, 6));
        assert_ne!(photo_seed(42, "cat", 12, 5), photo_seed(42, "cat1", 2, 5));
    }
}
