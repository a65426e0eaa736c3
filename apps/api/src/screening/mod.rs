// Résumé screening: domain classification, skill phrase extraction, scoring
// and the analyze/rank orchestration served by the HTTP handlers.

pub mod domain;
pub mod handlers;
pub mod pipeline;
pub mod scorer;
pub mod segmenter;
pub mod skills;
