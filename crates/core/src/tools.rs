// Folo tool catalog: names, descriptions, parameters and upstream routes

use crate::types::{ApiRoute, TransportKind};

/// Value type accepted for a tool parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Number,
    Boolean,
    StringArray,
    /// UTC RFC 3339 timestamp (`Z` suffix) carried as a string
    DateTime,
    /// Absolute URL carried as a string
    Url,
}

impl ParamKind {
    /// Human-readable name used in validation errors
    pub fn expected(&self) -> &'static str {
        match self {
            Self::String => "a string",
            Self::Number => "a number",
            Self::Boolean => "a boolean",
            Self::StringArray => "an array of strings",
            Self::DateTime => "an ISO 8601 UTC date-time (e.g. 2025-01-01T00:00:00Z)",
            Self::Url => "an absolute URL",
        }
    }
}

/// A single optional tool parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub description: Option<&'static str>,
}

impl ParamSpec {
    const fn new(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description: Some(description),
        }
    }

    const fn undocumented(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            description: None,
        }
    }
}

const VIEW: ParamSpec = ParamSpec::new(
    "view",
    ParamKind::Number,
    "Filter by view type, 0 for Articles, 1 for Social Media, 2 for Pictures, 3 for Videos, 4 for Audios, 5 for Notifications",
);
const USER_ID: ParamSpec = ParamSpec::new(
    "userId",
    ParamKind::String,
    "Filter by user ID, if not provided, the current user will be used",
);
const FEED_ID: ParamSpec = ParamSpec::new("feedId", ParamKind::String, "Filter by feed ID");
const LIST_ID: ParamSpec = ParamSpec::new("listId", ParamKind::String, "Filter by list ID");
const FEED_ID_LIST: ParamSpec = ParamSpec::new(
    "feedIdList",
    ParamKind::StringArray,
    "Filter by list of feed IDs",
);
const INBOX_ID: ParamSpec = ParamSpec::new("inboxId", ParamKind::String, "Filter by inbox ID");

const ENTRY_LIST_PARAMS: &[ParamSpec] = &[
    VIEW,
    FEED_ID,
    LIST_ID,
    FEED_ID_LIST,
    ParamSpec::new("read", ParamKind::Boolean, "Filter by read status"),
    ParamSpec::new("limit", ParamKind::Number, "Limit the number of entries returned"),
    ParamSpec::new(
        "publishedAfter",
        ParamKind::DateTime,
        "Filter by published date after this date",
    ),
    ParamSpec::new(
        "publishedBefore",
        ParamKind::DateTime,
        "Filter by published date before this date",
    ),
    ParamSpec::new(
        "isCollection",
        ParamKind::Boolean,
        "Filter by collection status, set true for Starred",
    ),
    ParamSpec::new("withContent", ParamKind::Boolean, "Include content in the response"),
];

const SUBSCRIPTION_LIST_PARAMS: &[ParamSpec] = &[VIEW, USER_ID];

const UNREAD_COUNT_PARAMS: &[ParamSpec] = &[VIEW];

const FEED_INFO_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("id", ParamKind::String, "Feed ID"),
    ParamSpec::new("url", ParamKind::Url, "Feed URL"),
];

const MARK_READ_PARAMS: &[ParamSpec] = &[
    VIEW,
    FEED_ID,
    LIST_ID,
    INBOX_ID,
    FEED_ID_LIST,
    ParamSpec::undocumented("startTime", ParamKind::Number),
    ParamSpec::undocumented("endTime", ParamKind::Number),
];

const HTTP_STREAM_PARAMS: &[ParamSpec] = &[VIEW, FEED_ID, LIST_ID];

/// Every tool this server can expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoloTool {
    EntryList,
    SubscriptionList,
    UnreadCount,
    FeedInfo,
    MarkRead,
    HttpStream,
}

impl FoloTool {
    pub const ALL: [FoloTool; 6] = [
        Self::EntryList,
        Self::SubscriptionList,
        Self::UnreadCount,
        Self::FeedInfo,
        Self::MarkRead,
        Self::HttpStream,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::EntryList => "entry_list",
            Self::SubscriptionList => "subscription_list",
            Self::UnreadCount => "unread_count",
            Self::FeedInfo => "feed_info",
            Self::MarkRead => "mark_read",
            Self::HttpStream => "http_stream",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::EntryList => "Get a list of entries from Folo",
            Self::SubscriptionList => "Get a list of subscriptions from Folo",
            Self::UnreadCount => "Get the unread count from Folo grouped by feed",
            Self::FeedInfo => "Get information about a specific feed by ID or URL",
            Self::MarkRead => "Mark entries as read by view, feed ID, or list ID, or inbox ID",
            Self::HttpStream => "Poll the Folo stream endpoint for new activity",
        }
    }

    pub fn route(&self) -> ApiRoute {
        match self {
            Self::EntryList => ApiRoute::post("/entries"),
            Self::SubscriptionList => ApiRoute::get("/subscriptions"),
            Self::UnreadCount => ApiRoute::get("/reads"),
            Self::FeedInfo => ApiRoute::get("/feeds"),
            Self::MarkRead => ApiRoute::post("/reads/all"),
            Self::HttpStream => ApiRoute::get("/stream"),
        }
    }

    pub fn params(&self) -> &'static [ParamSpec] {
        match self {
            Self::EntryList => ENTRY_LIST_PARAMS,
            Self::SubscriptionList => SUBSCRIPTION_LIST_PARAMS,
            Self::UnreadCount => UNREAD_COUNT_PARAMS,
            Self::FeedInfo => FEED_INFO_PARAMS,
            Self::MarkRead => MARK_READ_PARAMS,
            Self::HttpStream => HTTP_STREAM_PARAMS,
        }
    }

    /// `http_stream` is only offered to HTTP clients.
    pub fn is_available_on(&self, transport: TransportKind) -> bool {
        match self {
            Self::HttpStream => transport == TransportKind::Http,
            _ => true,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    /// Tools exposed on the given transport, in catalog order
    pub fn for_transport(transport: TransportKind) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|tool| tool.is_available_on(transport))
            .collect()
    }
}

impl std::fmt::Display for FoloTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
