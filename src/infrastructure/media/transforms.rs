// src/infrastructure/media/transforms.rs
//! Delivery URL rewrites for Cloudinary-hosted images.
//!
//! Every function returns `None` for URLs outside
//! `res.cloudinary.com/<cloud>/image/upload/`. When the path right after
//! `/image/upload/` already starts with a lowercase word the URL comes back
//! unchanged.

const UPLOAD_SEGMENT: &str = "/image/upload/";

pub const UNDER_1MB_WIDTHS: [u32; 2] = [1920, 1600];
pub const UNDER_1MB_QUALITIES: [&str; 3] = ["auto:eco", "auto:low", "60"];

fn is_cloudinary_url(url: &str) -> bool {
    let Some(host_at) = url.find("res.cloudinary.com/") else {
        return false;
    };
    let rest = &url[host_at + "res.cloudinary.com/".len()..];
    // at least one character of cloud name before the upload segment
    rest.find(UPLOAD_SEGMENT).is_some_and(|at| at > 0)
}

fn insert_transformation(url: &str, transformation: &str) -> Option<String> {
    if !is_cloudinary_url(url) {
        return None;
    }
    let Some(at) = url.find(UPLOAD_SEGMENT) else {
        return Some(url.to_string());
    };
    let split = at + UPLOAD_SEGMENT.len();
    let (head, tail) = url.split_at(split);
    if tail.starts_with(|c: char| c.is_ascii_lowercase()) {
        return Some(url.to_string());
    }
    Some(format!("{head}{transformation}/{tail}"))
}

/// Small, heavily blurred placeholder.
pub fn tiny_blur(url: &str) -> Option<String> {
    insert_transformation(url, "q_20,w_96,dpr_1,e_blur:300")
}

/// Blurred backdrop that fills an area; `fill_width` switches to a cropped
/// fill at that width.
pub fn tiny_blur_fill(url: &str, fill_width: Option<u32>) -> Option<String> {
    let fill = match fill_width {
        Some(width) => format!(",w_{width},c_fill,g_auto"),
        None => ",w_96".to_string(),
    };
    insert_transformation(url, &format!("f_auto,q_20{fill},dpr_1,e_blur:1200"))
}

pub fn optimized_cover(url: &str) -> Option<String> {
    insert_transformation(url, "f_auto,q_auto:good")
}

/// Aspect-preserving, never upscaled rendition.
pub fn no_crop_fit(url: &str, width: u32, height: Option<u32>, quality: &str) -> Option<String> {
    let mut parts = vec![
        "f_auto".to_string(),
        format!("q_{quality}"),
        "dpr_auto".to_string(),
    ];
    if let Some(height) = height {
        parts.push(format!("h_{height}"));
    }
    parts.push(format!("w_{width}"));
    parts.push("c_limit".to_string());
    insert_transformation(url, &parts.join(","))
}

/// No-crop candidates in probe order: widths outer, qualities inner.
/// Empty for non-Cloudinary URLs.
pub fn under_1mb_candidates(url: &str) -> Vec<String> {
    UNDER_1MB_WIDTHS
        .iter()
        .flat_map(|&width| {
            UNDER_1MB_QUALITIES
                .iter()
                .filter_map(move |quality| no_crop_fit(url, width, None, quality))
        })
        .collect()
}
