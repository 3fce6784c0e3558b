//! Built-in sample catalog.

use std::sync::LazyLock;

use crate::model::{AdRecord, Category};

const PLACEHOLDER_BASE: &str = "https://placehold.co/300x200/e0e0e0/333333?text=";

struct AdDef {
    id: &'static str,
    title: &'static str,
    company: &'static str,
    category: Category,
    tags: &'static [&'static str],
    duration: u32,
    reward: &'static str,
    promo_code: &'static str,
    description: &'static str,
    thumbnail_label: &'static str,
    popularity: f32,
    view_limit: u32,
}

const SAMPLE_DEFS: &[AdDef] = &[
    AdDef {
        id: "1",
        title: "Nike Running Shoes",
        company: "Nike",
        category: Category::Sports,
        tags: &["Shoes", "Running", "Athletic"],
        duration: 30,
        reward: "15% OFF",
        promo_code: "NIKE15RUN",
        description: "Discover our latest running shoes designed for maximum comfort and performance.",
        thumbnail_label: "Nike Shoes",
        popularity: 0.8,
        view_limit: 3,
    },
    AdDef {
        id: "2",
        title: "New Coffee Blend",
        company: "Starbucks",
        category: Category::Food,
        tags: &["Coffee", "Beverages", "Hot Drinks"],
        duration: 15,
        reward: "Buy 1 Get 1 Free",
        promo_code: "SBUX2FOR1",
        description: "Try our new seasonal coffee blend with notes of chocolate and caramel.",
        thumbnail_label: "Starbucks",
        popularity: 0.7,
        view_limit: 2,
    },
    AdDef {
        id: "3",
        title: "Wireless Headphones",
        company: "Sony",
        category: Category::Electronics,
        tags: &["Audio", "Wireless", "Tech"],
        duration: 45,
        reward: "$10 OFF",
        promo_code: "SONY10OFF",
        description: "Experience premium sound quality with our latest wireless headphones.",
        thumbnail_label: "Sony Headphones",
        popularity: 0.9,
        view_limit: 1,
    },
    AdDef {
        id: "4",
        title: "Premium Subscription",
        company: "Spotify",
        category: Category::Entertainment,
        tags: &["Music", "Streaming", "Premium"],
        duration: 20,
        reward: "1 Month Free",
        promo_code: "SPOT1MONTH",
        description: "Enjoy ad-free music streaming, offline listening, and unlimited skips.",
        thumbnail_label: "Spotify",
        popularity: 0.85,
        view_limit: 2,
    },
    AdDef {
        id: "5",
        title: "Online Course",
        company: "Udemy",
        category: Category::Education,
        tags: &["Learning", "Online", "Skills"],
        duration: 60,
        reward: "30% OFF",
        promo_code: "UDEMY30OFF",
        description: "Expand your skills with our most popular courses at a special discount.",
        thumbnail_label: "Udemy Course",
        popularity: 0.6,
        view_limit: 1,
    },
    AdDef {
        id: "6",
        title: "Smart Watch",
        company: "Apple",
        category: Category::Electronics,
        tags: &["Wearables", "Tech", "Fitness"],
        duration: 45,
        reward: "10% OFF",
        promo_code: "APPLEWATCH10",
        description: "Track your fitness, answer calls, and check notifications - all from your wrist.",
        thumbnail_label: "Apple Watch",
        popularity: 0.95,
        view_limit: 1,
    },
    AdDef {
        id: "7",
        title: "Meal Delivery",
        company: "HelloFresh",
        category: Category::Food,
        tags: &["Meals", "Cooking", "Subscription"],
        duration: 30,
        reward: "$15 OFF First Box",
        promo_code: "HELLOFRESH15",
        description: "Delicious recipes and fresh ingredients delivered to your door weekly.",
        thumbnail_label: "HelloFresh",
        popularity: 0.75,
        view_limit: 2,
    },
    AdDef {
        id: "8",
        title: "Gaming Console",
        company: "Microsoft",
        category: Category::Entertainment,
        tags: &["Gaming", "Tech", "Console"],
        duration: 60,
        reward: "Free Game Pass (1 month)",
        promo_code: "XBOXGAMEPASS",
        description: "Experience next-gen gaming with the most powerful console ever made.",
        thumbnail_label: "Xbox",
        popularity: 0.85,
        view_limit: 1,
    },
    AdDef {
        id: "9",
        title: "Gym Membership",
        company: "Fitness First",
        category: Category::Sports,
        tags: &["Fitness", "Gym", "Health"],
        duration: 30,
        reward: "50% OFF First Month",
        promo_code: "FIT50OFF",
        description: "State-of-the-art equipment, expert trainers, and classes for all fitness levels.",
        thumbnail_label: "Fitness First",
        popularity: 0.65,
        view_limit: 1,
    },
    AdDef {
        id: "10",
        title: "Language Learning App",
        company: "Duolingo",
        category: Category::Education,
        tags: &["Language", "Learning", "App"],
        duration: 20,
        reward: "3 Months Premium",
        promo_code: "DUOLINGO3MO",
        description: "Learn over 30 languages with fun, bite-sized lessons that feel like a game.",
        thumbnail_label: "Duolingo",
        popularity: 0.8,
        view_limit: 2,
    },
];

/// The sample ads shipped with the app, in catalog order.
pub static SAMPLE_ADS: LazyLock<Vec<AdRecord>> =
    LazyLock::new(|| SAMPLE_DEFS.iter().map(AdDef::to_record).collect());

impl AdDef {
    fn to_record(&self) -> AdRecord {
        AdRecord {
            id: self.id.to_string(),
            title: self.title.to_string(),
            company: self.company.to_string(),
            category: self.category,
            tags: self.tags.iter().map(|t| t.to_string()).collect(),
            duration: self.duration,
            reward: self.reward.to_string(),
            promo_code: self.promo_code.to_string(),
            description: self.description.to_string(),
            thumbnail: placeholder_image(self.thumbnail_label),
            popularity: self.popularity,
            view_limit: Some(self.view_limit),
        }
    }
}

/// Placeholder thumbnail URL with the label as URI-encoded text.
pub fn placeholder_image(label: &str) -> String {
    let mut url = String::with_capacity(PLACEHOLDER_BASE.len() + label.len() * 3);
    url.push_str(PLACEHOLDER_BASE);
    for b in label.bytes() {
        if b.is_ascii_alphanumeric() || b"-_.!~*'()".contains(&b) {
            url.push(b as char);
        } else {
            url.push_str(&format!("%{b:02X}"));
        }
    }
    url
}
