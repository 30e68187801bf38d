//! Application id to display name and glyph mapping.
//!
//! Keys are matched against the lowercase app id, first as a whole and then by its last
//! dot-segment (so `org.mozilla.firefox` matches `firefox`). Ids that match nothing get a
//! prettified version of that segment and the generic glyph.

use std::{borrow::Cow, collections::HashMap};

/// Glyph for applications without a catalog entry.
pub const FALLBACK_GLYPH: &str = "⬜";
/// Display name used when a window reports no app id.
pub const UNKNOWN_APP_NAME: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Display name and glyph for one application.
pub struct AppDisplay {
    pub name: Cow<'static, str>,
    pub glyph: Cow<'static, str>,
}

impl AppDisplay {
    pub fn new(name: impl Into<Cow<'static, str>>, glyph: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            glyph: glyph.into(),
        }
    }
}

// (key, name, glyph)
const BUILTIN_APPS: &[(&str, &str, &str)] = &[
    // Terminals
    ("kitty", "Kitty", "🐱"),
    ("alacritty", "Alacritty", "⬛"),
    ("foot", "Foot", "🦶"),
    ("wezterm", "WezTerm", "💻"),
    ("org.wezfurlong.wezterm", "WezTerm", "💻"),
    ("com.mitchellh.ghostty", "Ghostty", "👻"),
    ("ghostty", "Ghostty", "👻"),
    ("blackbox", "Black Box", "📦"),
    ("com.raggesilver.blackbox", "Black Box", "📦"),
    // Browsers
    ("firefox", "Firefox", "🦊"),
    ("org.mozilla.firefox", "Firefox", "🦊"),
    ("floorp", "Floorp", "🌊"),
    ("org.mozilla.floorp", "Floorp", "🌊"),
    ("chromium", "Chromium", "🌐"),
    ("org.chromium.chromium", "Chromium", "🌐"),
    ("brave-browser", "Brave", "🦁"),
    ("com.brave.browser", "Brave", "🦁"),
    ("google-chrome", "Chrome", "🔵"),
    ("com.google.chrome", "Chrome", "🔵"),
    ("qutebrowser", "qutebrowser", "⌨️"),
    ("zen", "Zen", "🧘"),
    ("app.zen-browser.zen", "Zen", "🧘"),
    // Editors / IDEs
    ("code", "VS Code", "⚡"),
    ("code-oss", "VS Code OSS", "⚡"),
    ("com.visualstudio.code", "VS Code", "⚡"),
    ("neovide", "Neovide", "💚"),
    ("nvim", "Neovim", "💚"),
    ("neovim", "Neovim", "💚"),
    ("helix", "Helix", "🌀"),
    ("emacs", "Emacs", "🟣"),
    ("zed", "Zed", "⚡"),
    ("dev.zed.zed", "Zed", "⚡"),
    ("jetbrains-idea", "IntelliJ", "🧠"),
    ("jetbrains-clion", "CLion", "🦁"),
    ("jetbrains-rider", "Rider", "🎯"),
    // File managers
    ("thunar", "Thunar", "📁"),
    ("nautilus", "Files", "📁"),
    ("org.gnome.nautilus", "Files", "📁"),
    ("dolphin", "Dolphin", "🐬"),
    ("org.kde.dolphin", "Dolphin", "🐬"),
    ("nemo", "Nemo", "📁"),
    ("org.nemo.nemo", "Nemo", "📁"),
    // Communication
    ("discord", "Discord", "💬"),
    ("com.discordapp.discord", "Discord", "💬"),
    ("vesktop", "Vesktop", "💬"),
    ("telegram-desktop", "Telegram", "✈️"),
    ("org.telegram.desktop", "Telegram", "✈️"),
    ("slack", "Slack", "💼"),
    ("com.slack.slack", "Slack", "💼"),
    ("element", "Element", "🔷"),
    ("im.riot.riot", "Element", "🔷"),
    ("signal-desktop", "Signal", "🔒"),
    ("org.signal.signal", "Signal", "🔒"),
    // Media
    ("spotify", "Spotify", "🎵"),
    ("com.spotify.client", "Spotify", "🎵"),
    ("mpv", "mpv", "▶️"),
    ("io.mpv.mpv", "mpv", "▶️"),
    ("vlc", "VLC", "🎬"),
    ("org.videolan.vlc", "VLC", "🎬"),
    ("rhythmbox", "Rhythmbox", "🎵"),
    ("org.gnome.rhythmbox3", "Rhythmbox", "🎵"),
    // Graphics / design
    ("gimp", "GIMP", "🎨"),
    ("org.gimp.gimp", "GIMP", "🎨"),
    ("inkscape", "Inkscape", "✒️"),
    ("org.inkscape.inkscape", "Inkscape", "✒️"),
    ("blender", "Blender", "🔶"),
    ("org.blender.blender", "Blender", "🔶"),
    ("krita", "Krita", "🖌️"),
    ("org.kde.krita", "Krita", "🖌️"),
    // System
    ("pavucontrol", "PulseAudio", "🔊"),
    ("org.pulseaudio.pavucontrol", "PulseAudio", "🔊"),
    ("org.gnome.settings", "Settings", "⚙️"),
    ("nm-connection-editor", "Network", "🌐"),
    ("org.kde.systemsettings", "Settings", "⚙️"),
    ("org.kde.plasma-systemmonitor", "System Monitor", "📊"),
    ("htop", "htop", "📊"),
    ("btop", "btop", "📊"),
];

#[derive(Debug, Clone, Default)]
/// Built-in application table plus user overrides, which take precedence.
pub struct AppCatalog {
    overrides: HashMap<String, AppDisplay>,
}

impl AppCatalog {
    /// Catalog with only the built-in table.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Catalog whose `overrides` (keyed by app id, matched case-insensitively) shadow built-ins.
    pub fn with_overrides<I, K>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, AppDisplay)>,
        K: AsRef<str>,
    {
        Self {
            overrides: overrides
                .into_iter()
                .map(|(key, display)| (key.as_ref().to_lowercase(), display))
                .collect(),
        }
    }

    /// Resolves display info for `app_id`.
    ///
    /// Tries an exact match, then the last dot-segment, then falls back to a prettified segment.
    pub fn resolve(&self, app_id: Option<&str>) -> AppDisplay {
        let Some(app_id) = app_id.filter(|id| !id.is_empty()) else {
            return AppDisplay::new(UNKNOWN_APP_NAME, FALLBACK_GLYPH);
        };
        let lower = app_id.to_lowercase();
        if let Some(display) = self.lookup(&lower) {
            return display;
        }

        let last = last_segment(&lower);
        if let Some(display) = self.lookup(last) {
            return display;
        }

        let source = if last.is_empty() { app_id } else { last };
        AppDisplay::new(prettify(source), FALLBACK_GLYPH)
    }

    /// Display name only; see [`AppCatalog::resolve`].
    pub fn display_name(&self, app_id: Option<&str>) -> Cow<'static, str> {
        self.resolve(app_id).name
    }

    fn lookup(&self, key: &str) -> Option<AppDisplay> {
        if let Some(display) = self.overrides.get(key) {
            return Some(display.clone());
        }
        BUILTIN_APPS
            .iter()
            .find(|(builtin, _, _)| *builtin == key)
            .map(|(_, name, glyph)| AppDisplay::new(*name, *glyph))
    }
}

/// Lowercase last dot-segment of `app_id`, or `unknown` when there is none.
pub fn app_slug(app_id: Option<&str>) -> String {
    match app_id.filter(|id| !id.is_empty()) {
        Some(id) => last_segment(&id.to_lowercase()).to_string(),
        None => "unknown".to_string(),
    }
}

fn last_segment(id: &str) -> &str {
    id.rsplit('.').next().unwrap_or(id)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Replaces `-`/`_` with spaces and upper-cases the first character of every word.
fn prettify(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut previous_is_word = false;
    for c in segment.chars() {
        let c = if c == '-' || c == '_' { ' ' } else { c };
        let is_word = is_word_char(c);
        if is_word && !previous_is_word {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        previous_is_word = is_word;
    }
    out
}
