use crate::model::CompanyRecord;

pub const SOCIAL_SEARCH_URL: &str = "https://twitter.com/search";
pub const DISCLOSURE_PORTAL_URL: &str = "https://www.release.tdnet.info/index.html";
pub const QUOTE_URL_PREFIX: &str = "https://finance.yahoo.co.jp/quote/";
pub const QUOTE_MARKET_SUFFIX: &str = ".T";
pub const WEB_SEARCH_URL: &str = "https://www.google.com/search";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Social,
    Disclosure,
    Quote,
    WebSearch,
}

impl LinkKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Social => "X (Twitter)",
            Self::Disclosure => "TDnet",
            Self::Quote => "Yahoo! Finance",
            Self::WebSearch => "Google",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundLink {
    pub kind: LinkKind,
    pub url: String,
}

impl OutboundLink {
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundLinks {
    pub social: OutboundLink,
    pub disclosure: OutboundLink,
    pub quote: OutboundLink,
    pub web_search: OutboundLink,
}

impl OutboundLinks {
    pub fn get(&self, kind: LinkKind) -> &OutboundLink {
        match kind {
            LinkKind::Social => &self.social,
            LinkKind::Disclosure => &self.disclosure,
            LinkKind::Quote => &self.quote,
            LinkKind::WebSearch => &self.web_search,
        }
    }

    pub fn panel_order(&self) -> [&OutboundLink; 4] {
        [&self.social, &self.disclosure, &self.quote, &self.web_search]
    }

    pub fn open_order(&self) -> [&OutboundLink; 4] {
        [&self.quote, &self.social, &self.disclosure, &self.web_search]
    }
}

pub fn derive_links(record: &CompanyRecord) -> OutboundLinks {
    let encoded_name = urlencoding::encode(&record.name);
    OutboundLinks {
        social: OutboundLink {
            kind: LinkKind::Social,
            url: format!("{SOCIAL_SEARCH_URL}?q={encoded_name}&src=typed_query&f=live"),
        },
        disclosure: OutboundLink {
            kind: LinkKind::Disclosure,
            url: DISCLOSURE_PORTAL_URL.to_string(),
        },
        quote: OutboundLink {
            kind: LinkKind::Quote,
            url: format!(
                "{QUOTE_URL_PREFIX}{}{QUOTE_MARKET_SUFFIX}",
                urlencoding::encode(&record.code)
            ),
        },
        web_search: OutboundLink {
            kind: LinkKind::WebSearch,
            url: format!("{WEB_SEARCH_URL}?q={encoded_name}"),
        },
    }
}
