// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use reqwest::redirect::Policy;
use reqwest::Client;
use std::net::IpAddr;
use tokio::net::lookup_host;
use url::{Host, Url};

/// 最多跟随的重定向次数
pub const MAX_REDIRECTS: usize = 10;

/// 检查目标 URL 是否指向公网地址
///
/// 用户提交的店铺地址会被服务端直接请求，因此拒绝解析到
/// 环回、私有网段、链路本地和组播地址的主机
pub async fn validate_url(url_str: &str) -> anyhow::Result<()> {
    let url = Url::parse(url_str)?;
    let host = url
        .host_str()
        .ok_or_else(|| anyhow::anyhow!("Missing host"))?;

    if host.eq_ignore_ascii_case("localhost") {
        return Err(anyhow::anyhow!("localhost is not allowed"));
    }

    let port = url.port_or_known_default().unwrap_or(80);
    // IPv6 literals keep their brackets in host_str
    let addrs = lookup_host(format!("{}:{}", host, port)).await?;

    for addr in addrs {
        if is_private_ip(addr.ip()) {
            return Err(anyhow::anyhow!(
                "private address is not allowed: {}",
                addr.ip()
            ));
        }
    }

    Ok(())
}

/// 不做 DNS 解析，只判断 `localhost` 和 IP 字面量
pub fn is_private_host(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => is_private_ip(IpAddr::V4(ip)),
        Some(Host::Ipv6(ip)) => is_private_ip(IpAddr::V6(ip)),
        None => true,
    }
}

/// 拒绝跳转到本地或私有地址的重定向策略
pub fn guarded_redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else if is_private_host(attempt.url()) {
            let message = format!(
                "redirect to private address is not allowed: {}",
                attempt.url()
            );
            attempt.error(message)
        } else {
            attempt.follow()
        }
    })
}

/// 创建抓取用的 HTTP 客户端
///
/// 启用私有地址拦截时，重定向目标同样要经过检查
pub fn http_client(block_private_addresses: bool) -> reqwest::Result<Client> {
    let policy = if block_private_addresses {
        guarded_redirect_policy()
    } else {
        Policy::limited(MAX_REDIRECTS)
    };
    Client::builder().redirect(policy).build()
}

fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(ipv4) => {
            ipv4.is_private()
                || ipv4.is_loopback()
                || ipv4.is_link_local()
                || ipv4.is_multicast()
                || ipv4.is_unspecified()
        }
        IpAddr::V6(ipv6) => {
            let first = ipv6.segments()[0];
            ipv6.is_loopback()
                || ipv6.is_unspecified()
                // fc00::/7
                || (first & 0xfe00) == 0xfc00
                // fe80::/10
                || (first & 0xffc0) == 0xfe80
                // ff00::/8
                || (first & 0xff00) == 0xff00
        }
    }
}
