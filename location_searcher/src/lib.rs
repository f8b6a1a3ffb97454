pub mod latest;
pub mod reverse;
pub mod searcher;
pub mod text_search;
