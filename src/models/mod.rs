pub mod search;
pub mod selection;

pub use search::{
    ApiErrorResponse, ApiSearchResponse, ErrorCode, ErrorEnvelope, ProxyParams,
    SearchResultItem, UNTITLED,
};
pub use selection::{
    Dimension, KeywordTable, Selection, SelectionOptions, ACTIVITY_KEYWORDS, GENRE_KEYWORDS,
    MOOD_KEYWORDS,
};
