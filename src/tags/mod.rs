//! HTML tag string rendering.
//!
//! Pure string builders for `<meta>` tags and head fragments. Names and
//! contents are attribute-escaped; wiring the output into a template
//! engine is the host application's business.

use serde_json::Value;

use crate::meta::Meta;
use crate::schema::JsonMap;
use crate::utils::html::{escape, escape_attr};

/// `<meta {attr}="{name}" content="{content}">`
pub fn custom_meta(attr: &str, name: &str, content: &str) -> String {
    format!(
        r#"<meta {}="{}" content="{}">"#,
        escape_attr(attr),
        escape_attr(name),
        escape_attr(content)
    )
}

/// `<meta name="{name}" content="{content}">`
pub fn meta_tag(name: &str, content: &str) -> String {
    custom_meta("name", name, content)
}

/// A single meta holding a list of values (e.g., keywords).
pub fn meta_list(name: &str, items: &[String]) -> String {
    custom_meta("name", name, &items.join(", "))
}

/// Markup for additional props; falsy contents are skipped.
pub fn meta_extras(props: &JsonMap) -> String {
    props
        .iter()
        .filter_map(|(name, value)| {
            let content = value_text(value)?;
            Some(meta_tag(name, &content))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Markup for additional custom props; empty contents are skipped.
pub fn custom_meta_extras(props: &[(String, String, String)]) -> String {
    props
        .iter()
        .filter(|(_, _, content)| !content.is_empty())
        .map(|(attr, name, content)| custom_meta(attr, name, content))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `<title>{value}</title>`
pub fn title_tag(value: &str) -> String {
    format!("<title>{}</title>", escape(value))
}

/// Namespaced property, e.g. `generic_prop("fb", "app_id", ..)`.
pub fn generic_prop(namespace: &str, name: &str, value: &str) -> String {
    custom_meta("property", &format!("{namespace}:{name}"), value)
}

/// Open Graph property (without the `og:` prefix).
pub fn og_prop(name: &str, value: &str) -> String {
    generic_prop("og", name, value)
}

/// Facebook property (without the `fb:` prefix).
pub fn facebook_prop(name: &str, value: &str) -> String {
    generic_prop("fb", name, value)
}

/// Twitter property (without the `twitter:` prefix).
pub fn twitter_prop(name: &str, value: &str) -> String {
    custom_meta("name", &format!("twitter:{name}"), value)
}

/// Schema.org itemprop meta tag.
pub fn itemprop(name: &str, value: &str) -> String {
    custom_meta("itemprop", name, value)
}

/// Attribute fragment declaring a Schema.org scope on `<html>` or
/// `<body>`.
pub fn schemaorg_scope(object_type: &str) -> String {
    format!(
        " itemscope itemtype=\"https://schema.org/{}\" ",
        escape_attr(object_type)
    )
}

/// Head `prefix` attribute with the OG namespaces in use.
pub fn meta_namespaces(meta: &Meta) -> String {
    let mut namespaces = vec!["og: http://ogp.me/ns#".to_string()];

    // Facebook namespace comes before any custom ones
    if meta.use_facebook {
        namespaces.push("fb: http://ogp.me/ns/fb#".to_string());
    }
    for ns in &meta.custom_namespace {
        namespaces.push(format!("{ns}: http://ogp.me/ns/{ns}#"));
    }

    format!(" prefix=\"{}\"", escape_attr(&namespaces.join(" ")))
}

/// JSON-LD script block.
///
/// `<` is escaped as `\u003c` inside the JSON so document content
/// can never close the script element early.
pub fn json_ld_script(json: &str) -> String {
    format!(
        "<script type=\"application/ld+json\">{}</script>",
        json.replace('<', "\\u003c")
    )
}

/// Render the complete head fragment for a resolved [`Meta`].
///
/// Channel blocks honor the `use_*` flags; absent values produce no
/// tags.
pub fn render_head(meta: &Meta) -> String {
    let mut tags: Vec<String> = Vec::new();

    if meta.use_title_tag
        && let Some(title) = &meta.title
    {
        tags.push(title_tag(title));
    }
    if let Some(description) = &meta.description {
        tags.push(meta_tag("description", description));
    }
    if !meta.keywords.is_empty() {
        tags.push(meta_list("keywords", &meta.keywords));
    }

    if meta.use_og {
        push_some(&mut tags, "title", &meta.og_title, og_prop);
        push_some(&mut tags, "description", &meta.og_description, og_prop);
        push_some(&mut tags, "type", &meta.og_type, og_prop);
        push_some(&mut tags, "url", &meta.url, og_prop);
        push_some(&mut tags, "site_name", &meta.site_name, og_prop);
        push_some(&mut tags, "locale", &meta.locale, og_prop);

        if let Some(image) = &meta.image {
            tags.push(og_prop("image", &image.url));
            if let Some(secure_url) = &image.secure_url {
                tags.push(og_prop("image:secure_url", secure_url));
            }
            if let Some(width) = image.width {
                tags.push(og_prop("image:width", &width.to_string()));
            }
            if let Some(height) = image.height {
                tags.push(og_prop("image:height", &height.to_string()));
            }
            if let Some(alt) = &image.alt {
                tags.push(og_prop("image:alt", alt));
            }
        }

        let article = |name: &str, value: &str| generic_prop("article", name, value);
        push_some(&mut tags, "published_time", &meta.published_time, article);
        push_some(&mut tags, "modified_time", &meta.modified_time, article);
        push_some(&mut tags, "expiration_time", &meta.expiration_time, article);
        for tag in &meta.tags {
            tags.push(article("tag", tag));
        }

        if meta.use_facebook {
            push_some(&mut tags, "app_id", &meta.facebook_app_id, facebook_prop);
            push_some(&mut tags, "pages", &meta.fb_pages, facebook_prop);
            push_some(&mut tags, "profile_id", &meta.og_profile_id, facebook_prop);
            push_some(&mut tags, "publisher", &meta.og_publisher, article);
            push_some(&mut tags, "author", &meta.og_author_url, article);
        }
    }

    if meta.use_twitter {
        push_some(&mut tags, "card", &meta.twitter_card, twitter_prop);
        push_some(&mut tags, "site", &meta.twitter_site, twitter_prop);
        push_some(&mut tags, "creator", &meta.twitter_creator, twitter_prop);
        push_some(&mut tags, "title", &meta.twitter_title, twitter_prop);
        push_some(&mut tags, "description", &meta.twitter_description, twitter_prop);
        if let Some(image) = &meta.image {
            tags.push(twitter_prop("image", &image.url));
        }
    }

    if meta.use_schemaorg {
        push_some(&mut tags, "name", &meta.schemaorg_title, itemprop);
        push_some(&mut tags, "description", &meta.schemaorg_description, itemprop);
        if let Some(image) = &meta.image {
            tags.push(itemprop("image", &image.url));
        }
        if let Some(json_ld) = meta.as_json_ld() {
            tags.push(json_ld_script(&json_ld));
        }
    }

    if !meta.extra_props.is_empty() {
        tags.push(meta_extras(&meta.extra_props));
    }
    if !meta.extra_custom_props.is_empty() {
        tags.push(custom_meta_extras(&meta.extra_custom_props));
    }

    tags.join("\n")
}

fn push_some(
    tags: &mut Vec<String>,
    name: &str,
    value: &Option<String>,
    render: impl Fn(&str, &str) -> String,
) {
    if let Some(value) = value {
        tags.push(render(name, value));
    }
}

/// String content for a JSON value; falsy values yield `None`.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}
