pub mod aggregate;
pub mod card;
pub mod catalog;
pub mod disclosure;
pub mod html;
pub mod loader;
mod markup;
pub mod page;
pub mod record;
pub mod summary;

pub use aggregate::{aggregate, round_half_up, AggregateResult, Band};
pub use card::{render_card, render_card_in, CardContext, CardView};
pub use catalog::{Part, TopicGrid};
pub use disclosure::{DisclosureAction, DisclosureState, DisclosureStates, FocusTarget};
pub use html::{CardHtml, ListingHtml};
pub use loader::{DataLocation, FetchCache, HttpReviewSource, LoadError, ReviewLoader, ReviewSource};
pub use markup::EscapedText;
pub use page::{build_listing, failed_listing, ListingView, PageOptions};
pub use record::{PartScores, ReviewDocument, ReviewRecord, TopicFlags};
