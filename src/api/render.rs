use crate::models::video::VideoResult;

// Both pages are self-contained documents; there is no template engine
// and no per-session state behind them.

const PAGE_STYLE: &str = r#"
    * { margin: 0; padding: 0; box-sizing: border-box; }
    body {
        font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
        background: linear-gradient(135deg, #f8b5c1 0%, #b48ec9 100%);
        min-height: 100vh;
        display: flex;
        align-items: center;
        justify-content: center;
        padding: 20px;
    }
    .container {
        background: white;
        border-radius: 16px;
        box-shadow: 0 16px 48px rgba(0,0,0,0.25);
        max-width: 760px;
        width: 100%;
        padding: 36px;
    }
    h1 { color: #333; margin-bottom: 8px; font-size: 1.8em; }
    .subtitle { color: #777; margin-bottom: 24px; font-size: 0.9em; }
    label { display: block; color: #555; font-weight: 600; margin: 14px 0 4px; }
    input[type=text] {
        width: 100%;
        padding: 10px;
        border: 1px solid #ddd;
        border-radius: 8px;
        font-size: 1em;
    }
    input[type=file] { margin-top: 4px; }
    button {
        margin-top: 22px;
        width: 100%;
        padding: 12px;
        border: none;
        border-radius: 8px;
        background: #b48ec9;
        color: white;
        font-size: 1.05em;
        font-weight: 600;
        cursor: pointer;
    }
    button:hover { background: #9d74b5; }
    .query { color: #777; font-size: 0.9em; margin-bottom: 20px; word-break: break-word; }
    .video {
        display: flex;
        gap: 16px;
        align-items: center;
        padding: 12px 0;
        border-bottom: 1px solid #eee;
    }
    .video img { width: 160px; border-radius: 8px; }
    .video a { color: #7a4f96; font-weight: 600; text-decoration: none; }
    .video a:hover { text-decoration: underline; }
    .empty { color: #999; padding: 24px 0; text-align: center; }
    .back { display: inline-block; margin-top: 20px; color: #7a4f96; text-decoration: none; }
"#;

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// The blank submission form.
pub fn index_page() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>GlowMatch</title>
<style>{PAGE_STYLE}</style>
</head>
<body>
<div class="container">
<h1>GlowMatch</h1>
<p class="subtitle">Upload a selfie and tell us about the look you are going for.</p>
<form method="post" action="/" enctype="multipart/form-data">
<label for="image">Your photo</label>
<input type="file" id="image" name="image" accept="image/*">
<label for="event">Event</label>
<input type="text" id="event" name="event" placeholder="wedding, party, office...">
<label for="skin_type">Skin type</label>
<input type="text" id="skin_type" name="skin_type" placeholder="oily, dry, combination...">
<label for="style">Style</label>
<input type="text" id="style" name="style" placeholder="natural, glam, bold...">
<label for="duration">Tutorial length</label>
<input type="text" id="duration" name="duration" placeholder="5 minutes, quick...">
<label for="focus_area">Focus area</label>
<input type="text" id="focus_area" name="focus_area" placeholder="eyes, lips, base...">
<label for="manual_skin">Skin tone (optional, overrides photo analysis)</label>
<input type="text" id="manual_skin" name="manual_skin" placeholder="fair, olive, deep...">
<button type="submit">Find tutorials</button>
</form>
</div>
</body>
</html>
"#
    )
}

/// The results page for one submission.
pub fn results_page(query: &str, videos: &[VideoResult]) -> String {
    let mut listing = String::new();
    if videos.is_empty() {
        listing.push_str(r#"<p class="empty">No videos found. Try different preferences.</p>"#);
    } else {
        for video in videos {
            listing.push_str(&format!(
                r#"<div class="video">
<img src="{thumb}" alt="">
<a href="{url}" target="_blank" rel="noopener">{title}</a>
</div>
"#,
                thumb = escape_html(&video.thumbnail),
                url = escape_html(&video.url),
                title = escape_html(&video.title),
            ));
        }
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>GlowMatch results</title>
<style>{PAGE_STYLE}</style>
</head>
<body>
<div class="container">
<h1>Tutorials for you</h1>
<p class="query">Searched for: {query}</p>
{listing}
<a class="back" href="/">&larr; Try another look</a>
</div>
</body>
</html>
"#,
        query = escape_html(query),
    )
}
