//! Constants shared by the parser and renderer

/// Default tag delimiters
pub mod tags {
    /// Opening delimiter used when no tags are configured
    pub const DEFAULT_OPEN_TAG: &str = "{{";

    /// Closing delimiter used when no tags are configured
    pub const DEFAULT_CLOSE_TAG: &str = "}}";
}

/// HTML escaping table used by the default escaper
pub mod html {
    /// Characters replaced by `escape_html`, with their entities
    pub const ENTITIES: [(char, &str); 8] = [
        ('&', "&amp;"),
        ('<', "&lt;"),
        ('>', "&gt;"),
        ('"', "&quot;"),
        ('\'', "&#39;"),
        ('/', "&#x2F;"),
        ('`', "&#x60;"),
        ('=', "&#x3D;"),
    ];
}

/// Tag sigils recognised right after the opening delimiter
pub mod sigils {
    pub const PARTIAL: char = '>';
    pub const CHANGE_DELIMITERS: char = '=';
    pub const UNESCAPED: char = '&';
    pub const UNESCAPED_ALIAS: char = '{';
    pub const SECTION: char = '#';
    pub const INVERTED_SECTION: char = '^';
    pub const CLOSE_SECTION: char = '/';
    pub const COMMENT: char = '!';
}
