//! Entities module - contains the business records

pub mod article;

pub use article::{Article, ArticleCreateRules, ArticleDraft, ArticlePatch, ArticleUpdateRules};
