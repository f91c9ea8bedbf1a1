use std::fmt::Write as _;

pub type PageNum = i64;

/// The `?page=N&page_size=M` portion of a listing URL. Pages are 1-indexed.
#[derive(serde::Deserialize, Clone, Copy)]
pub struct Query {
	pub page: Option<PageNum>,
	pub page_size: Option<PageNum>,
}

pub const fn default_page() -> PageNum {
	1
}

pub const fn default_page_size() -> PageNum {
	20
}

impl Query {
	#[inline]
	pub fn page(&self) -> PageNum {
		self.page.unwrap_or(default_page()).max(1)
	}

	#[inline]
	pub fn page_size(&self) -> PageNum {
		self.page_size.unwrap_or(default_page_size()).clamp(1, 100)
	}

	#[inline]
	pub fn offset(&self) -> PageNum {
		(self.page() - 1) * self.page_size()
	}

	#[inline]
	pub fn limit(&self) -> PageNum {
		self.page_size()
	}
}

pub fn num_pages(num_items: i64, page_size: PageNum) -> PageNum {
	if num_items <= 0 {
		0
	} else {
		(num_items + page_size - 1) / page_size
	}
}

/// One slot of the pagination control: a numbered page, or a gap standing in
/// for the pages elided on one side of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
	Page(PageNum),
	Ellipsis(Gap),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gap {
	Before,
	After,
}

/// The first and last pages are always shown; a window of up to three pages
/// follows the current page between them, with a gap marker on each side that
/// has elided pages. The window is bounded to `[2, total_pages - 1]` so the
/// first/last slots are never duplicated.
pub fn compute_window(current_page: PageNum, total_pages: PageNum) -> Vec<PageToken> {
	let mut tokens = vec![PageToken::Page(1)];

	let mut range_start = std::cmp::max(2, current_page - 1);
	let mut range_end = std::cmp::min(total_pages - 1, current_page + 1);
	if range_end - range_start < 2 {
		// the window is pinned against an edge; widen it away from that edge
		if range_start == 2 {
			range_end = std::cmp::min(total_pages - 1, range_end + 1);
		} else if range_end == total_pages - 1 {
			range_start = std::cmp::max(2, range_start - 1);
		}
	}

	if range_start > 2 {
		tokens.push(PageToken::Ellipsis(Gap::Before));
	}
	for page in range_start..=range_end {
		tokens.push(PageToken::Page(page));
	}
	if range_end < total_pages - 1 {
		tokens.push(PageToken::Ellipsis(Gap::After));
	}

	if total_pages > 1 {
		tokens.push(PageToken::Page(total_pages));
	}

	tokens
}

/// Sets the `page` query parameter of `base_url` to `page`, keeping every
/// other parameter. The scheme and host are discarded if present; a value
/// that does not parse as a URI at all is taken as a bare path.
pub fn href_for_page(base_url: &str, page: PageNum) -> String {
	let (path, query) = match base_url.parse::<http::Uri>() {
		Ok(uri) => (uri.path().to_owned(), uri.query().map(str::to_owned)),
		Err(_) => (base_url.to_owned(), None),
	};

	let mut href = path;
	let mut separator = '?';
	for pair in query.as_deref().unwrap_or("").split('&') {
		if pair.is_empty() || pair.split('=').next() == Some("page") {
			continue;
		}
		href.push(separator);
		href.push_str(pair);
		separator = '&';
	}
	write!(href, "{separator}page={page}").unwrap();
	href
}

/// What the partial template actually renders; built from [`PageToken`]s
/// with hrefs resolved and the current page marked.
#[derive(Debug, PartialEq, Eq)]
enum Entry {
	Current(PageNum),
	Link(PageNum, String),
	Ellipsis,
}

#[derive(askama::Template)]
#[template(path = "_partials/pagination.html")]
pub struct Template {
	prev: Option<String>,
	entries: Vec<Entry>,
	next: Option<String>,
}

impl Template {
	/// `None` when there is at most one page: the caller is expected to
	/// render no pagination control at all in that case.
	pub fn from_query(query: Query, num_pages: PageNum, base_url: &str) -> Option<Self> {
		if num_pages <= 1 {
			return None;
		}

		let current = query.page();
		let entries = compute_window(current, num_pages)
			.into_iter()
			.map(|token| match token {
				PageToken::Page(page) if page == current => Entry::Current(page),
				PageToken::Page(page) => Entry::Link(page, href_for_page(base_url, page)),
				PageToken::Ellipsis(_) => Entry::Ellipsis,
			})
			.collect();

		Some(Self {
			prev: (current > 1).then(|| href_for_page(base_url, current - 1)),
			entries,
			next: (current < num_pages).then(|| href_for_page(base_url, current + 1)),
		})
	}
}

#[cfg(test)]
mod test {
	use super::{compute_window, href_for_page, num_pages, Entry, Gap, PageNum, PageToken, Query, Template};
	use PageToken::{Ellipsis, Page};

	fn query(page: PageNum) -> Query {
		Query {
			page: Some(page),
			page_size: None,
		}
	}

	fn page_numbers(tokens: &[PageToken]) -> Vec<PageNum> {
		tokens
			.iter()
			.filter_map(|token| match token {
				Page(page) => Some(*page),
				Ellipsis(_) => None,
			})
			.collect()
	}

	#[test]
	fn middle_window() {
		assert_eq!(
			compute_window(5, 10),
			[
				Page(1),
				Ellipsis(Gap::Before),
				Page(4),
				Page(5),
				Page(6),
				Ellipsis(Gap::After),
				Page(10),
			],
		);
	}

	#[test]
	fn left_pinned_widening() {
		// the window cannot extend left past page 2, so it grows rightward instead
		assert_eq!(
			compute_window(1, 10),
			[Page(1), Page(2), Page(3), Ellipsis(Gap::After), Page(10)],
		);
		assert_eq!(
			compute_window(2, 10),
			[
				Page(1),
				Page(2),
				Page(3),
				Page(4),
				Ellipsis(Gap::After),
				Page(10),
			],
		);
	}

	#[test]
	fn right_pinned_widening() {
		assert_eq!(
			compute_window(10, 10),
			[Page(1), Ellipsis(Gap::Before), Page(8), Page(9), Page(10)],
		);
		assert_eq!(
			compute_window(9, 10),
			[
				Page(1),
				Ellipsis(Gap::Before),
				Page(7),
				Page(8),
				Page(9),
				Page(10),
			],
		);
	}

	#[test]
	fn two_pages() {
		// the middle range is inverted and empty; only the endpoints remain
		assert_eq!(compute_window(1, 2), [Page(1), Page(2)]);
		assert_eq!(compute_window(2, 2), [Page(1), Page(2)]);
	}

	#[test]
	fn three_pages() {
		assert_eq!(compute_window(2, 3), [Page(1), Page(2), Page(3)]);
	}

	#[test]
	fn endpoints_and_no_duplicates() {
		for total in 2..=30 {
			for current in 1..=total {
				let tokens = compute_window(current, total);
				assert_eq!(tokens.first(), Some(&Page(1)), "{current}/{total}");
				assert_eq!(tokens.last(), Some(&Page(total)), "{current}/{total}");
				let pages = page_numbers(&tokens);
				let mut deduplicated = pages.clone();
				deduplicated.dedup();
				assert_eq!(pages, deduplicated, "{current}/{total}");
				assert!(pages.windows(2).all(|pair| pair[0] < pair[1]), "{current}/{total}");
			}
		}
	}

	#[test]
	fn no_gaps_for_small_totals() {
		for total in 2..=4 {
			for current in 1..=total {
				let tokens = compute_window(current, total);
				assert!(
					tokens.iter().all(|token| matches!(token, Page(_))),
					"{current}/{total}",
				);
				assert_eq!(page_numbers(&tokens), (1..=total).collect::<Vec<_>>());
			}
		}
	}

	#[test]
	fn window_tracks_current_page() {
		// far from both edges, the window is exactly the current page and its
		// neighbors, bounded by a gap on each side
		for total in 7..=20 {
			for current in 4..=(total - 3) {
				assert_eq!(
					compute_window(current, total),
					[
						Page(1),
						Ellipsis(Gap::Before),
						Page(current - 1),
						Page(current),
						Page(current + 1),
						Ellipsis(Gap::After),
						Page(total),
					],
					"{current}/{total}",
				);
			}
		}
	}

	#[test]
	fn href_appends_page() {
		assert_eq!(href_for_page("/search?q=x", 3), "/search?q=x&page=3");
		assert_eq!(href_for_page("/", 2), "/?page=2");
	}

	#[test]
	fn href_overwrites_existing_page() {
		assert_eq!(href_for_page("/search?page=9&q=x", 3), "/search?q=x&page=3");
		assert_eq!(href_for_page("/?page=1", 4), "/?page=4");
	}

	#[test]
	fn href_discards_origin() {
		assert_eq!(
			href_for_page("https://example.com/startups?tag=ai", 2),
			"/startups?tag=ai&page=2",
		);
	}

	#[test]
	fn num_pages_rounds_up() {
		assert_eq!(num_pages(0, 20), 0);
		assert_eq!(num_pages(1, 20), 1);
		assert_eq!(num_pages(20, 20), 1);
		assert_eq!(num_pages(21, 20), 2);
	}

	#[test]
	fn suppressed_when_one_page_or_fewer() {
		assert!(Template::from_query(query(1), 0, "/").is_none());
		assert!(Template::from_query(query(1), 1, "/").is_none());
		assert!(Template::from_query(query(1), 2, "/").is_some());
	}

	#[test]
	fn prev_and_next_stop_at_the_edges() {
		let first = Template::from_query(query(1), 5, "/").unwrap();
		assert_eq!(first.prev, None);
		assert_eq!(first.next.as_deref(), Some("/?page=2"));

		let last = Template::from_query(query(5), 5, "/").unwrap();
		assert_eq!(last.prev.as_deref(), Some("/?page=4"));
		assert_eq!(last.next, None);
	}

	#[test]
	fn current_page_is_not_a_link() {
		let template = Template::from_query(query(2), 3, "/?q=x").unwrap();
		assert_eq!(
			template.entries,
			[
				Entry::Link(1, "/?q=x&page=1".to_owned()),
				Entry::Current(2),
				Entry::Link(3, "/?q=x&page=3".to_owned()),
			],
		);
	}
}
