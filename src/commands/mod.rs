pub mod cite;
pub mod clean;
pub mod crawl;
pub mod summarize;

pub use cite::run_cite;
pub use clean::run_clean;
pub use crawl::run_crawl;
pub use summarize::run_summarize;
