// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::response::{Html, Redirect};

const SHOPIFY_SEO_PAGE: &str = include_str!("../../../templates/shopify_seo.html");
const SOCIAL_MEDIA_PAGE: &str = include_str!("../../../templates/social_media.html");

/// 默认跳转到 SEO 分析页面
pub async fn index() -> Redirect {
    Redirect::to("/shopify-seo")
}

pub async fn shopify_seo_page() -> Html<&'static str> {
    Html(SHOPIFY_SEO_PAGE)
}

pub async fn social_media_page() -> Html<&'static str> {
    Html(SOCIAL_MEDIA_PAGE)
}
