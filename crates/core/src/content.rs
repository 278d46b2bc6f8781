//! Typed page content for the showcase site.
//!
//! The "home vs retail" mode is explicit input (query parameter or CLI
//! flag) and selection is a pure function over static tables; nothing is
//! read from ambient storage.

use serde::Serialize;

/// Which audience the landing content addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Home,
    Retail,
}

impl ViewMode {
    /// Resolve an explicit query/flag value. Anything unrecognized (or
    /// absent) falls back to `Home`, the site's default view.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("retail") => ViewMode::Retail,
            _ => ViewMode::Home,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Benefit {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct ContentSection {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub benefits: &'static [Benefit],
}

static HOME: ContentSection = ContentSection {
    title: "Wear the Future. The Vault Mirror",
    subtitle: "For those who dare to redefine style.",
    benefits: &[
        Benefit {
            icon: "\u{2728}",
            title: "Smart Organization",
            description: "AI-powered wardrobe management that learns your style and keeps your clothes perfectly organized.",
        },
        Benefit {
            icon: "\u{1F3AF}",
            title: "Perfect Outfits",
            description: "Get personalized outfit recommendations based on your style, occasion, and weather.",
        },
        Benefit {
            icon: "\u{1F504}",
            title: "Virtual Try-On",
            description: "See how clothes will look on you before you buy with our advanced AR technology.",
        },
        Benefit {
            icon: "\u{1F916}",
            title: "AI Stylist",
            description: "Your personal AI fashion advisor available 24/7, learning and evolving with your style preferences.",
        },
    ],
};

static RETAIL: ContentSection = ContentSection {
    title: "Transform Your Retail Experience.",
    subtitle: "Engage. Convert. Grow. Scale.",
    benefits: &[
        Benefit {
            icon: "\u{1F4CA}",
            title: "Data Insights",
            description: "Get real-time analytics on customer preferences and shopping behavior.",
        },
        Benefit {
            icon: "\u{1F3AF}",
            title: "Smart Inventory",
            description: "AI-powered inventory management that predicts trends and optimizes stock levels.",
        },
        Benefit {
            icon: "\u{1F31F}",
            title: "Customer Experience",
            description: "Provide personalized shopping experiences with virtual try-on and style recommendations.",
        },
    ],
};

/// The content-selection function: explicit mode in, section out.
pub fn section_for(mode: ViewMode) -> &'static ContentSection {
    match mode {
        ViewMode::Home => &HOME,
        ViewMode::Retail => &RETAIL,
    }
}

/// Gallery moods offered as filters.
pub const MOODS: &[&str] = &[
    "Boardroom",
    "Date Night",
    "Casual",
    "Formal",
    "Streetwear",
    "Athletic",
];

/// Gallery brands offered as filters.
pub const BRANDS: &[&str] = &["Nike", "Zara", "H&M", "Gucci", "Adidas", "Uniqlo", "Levi's"];

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Outfit {
    pub title: &'static str,
    pub mood: &'static str,
    pub brand: &'static str,
    pub price: u32,
}

/// Curated gallery catalog.
pub static CATALOG: &[Outfit] = &[
    Outfit { title: "Outfit 1", mood: "Boardroom", brand: "Gucci", price: 420 },
    Outfit { title: "Outfit 2", mood: "Casual", brand: "Uniqlo", price: 85 },
    Outfit { title: "Outfit 3", mood: "Streetwear", brand: "Nike", price: 150 },
    Outfit { title: "Outfit 4", mood: "Date Night", brand: "Zara", price: 120 },
    Outfit { title: "Outfit 5", mood: "Athletic", brand: "Adidas", price: 95 },
    Outfit { title: "Outfit 6", mood: "Formal", brand: "Gucci", price: 510 },
    Outfit { title: "Outfit 7", mood: "Casual", brand: "Levi's", price: 110 },
    Outfit { title: "Outfit 8", mood: "Streetwear", brand: "H&M", price: 65 },
];

/// Optional mood/brand narrowing over the catalog.
#[derive(Clone, Copy, Debug, Default)]
pub struct OutfitFilter<'a> {
    pub mood: Option<&'a str>,
    pub brand: Option<&'a str>,
}

impl OutfitFilter<'_> {
    pub fn matches(&self, outfit: &Outfit) -> bool {
        if let Some(mood) = self.mood {
            if outfit.mood != mood {
                return false;
            }
        }
        if let Some(brand) = self.brand {
            if outfit.brand != brand {
                return false;
            }
        }
        true
    }
}

pub fn filter_catalog(filter: OutfitFilter<'_>) -> Vec<&'static Outfit> {
    CATALOG.iter().filter(|o| filter.matches(o)).collect()
}
