use std::collections::HashMap;

/// Immutable domain lexicon used by the preprocessor and suggestion engine.
///
/// Loaded once at startup and shared behind an `Arc`; tests construct smaller
/// lexicons via [`Lexicon::new`]. Vocabulary order matters: typo-correction
/// ties resolve to the earliest entry.
#[derive(Debug, Clone)]
pub struct Lexicon {
    vocabulary: Vec<String>,
    synonyms: HashMap<String, Vec<String>>,
    vague_adjectives: Vec<String>,
    popular_queries: Vec<String>,
}

impl Lexicon {
    pub fn new(
        vocabulary: Vec<String>,
        synonyms: HashMap<String, Vec<String>>,
        vague_adjectives: Vec<String>,
        popular_queries: Vec<String>,
    ) -> Self {
        Self {
            vocabulary,
            synonyms,
            vague_adjectives,
            popular_queries,
        }
    }

    /// The fixed production vocabulary: food types, cuisines, venue styles,
    /// event types, entertainment terms, amenities, and generic descriptors.
    pub fn default_domain() -> Self {
        let vocabulary = [
            // Food types and cuisines
            "seafood", "barbecue", "bbq", "italian", "mexican", "chinese", "indian", "thai",
            "japanese", "mediterranean", "french", "korean", "vegan", "vegetarian", "kosher",
            "halal", "buffet", "catering", "dessert", "appetizers", "cocktails", "brunch",
            "pizza", "sushi", "tacos", "steakhouse",
            // Venue styles
            "outdoor", "indoor", "rustic", "barn", "garden", "rooftop", "ballroom", "beach",
            "vineyard", "industrial", "loft", "banquet", "estate", "waterfront", "historic",
            // Event types
            "wedding", "birthday", "corporate", "anniversary", "graduation", "reunion", "gala",
            "conference", "fundraiser", "shower", "retirement", "reception", "party",
            // Entertainment
            "band", "music", "karaoke", "photobooth", "magician", "comedian", "acoustic",
            "orchestra", "violinist", "saxophone", "fireworks",
            // Amenities
            "parking", "wifi", "stage", "dancefloor", "projector", "patio", "fireplace",
            "terrace", "accessible",
            // Generic descriptors
            "elegant", "casual", "formal", "luxury", "affordable", "intimate", "spacious",
            "modern", "vintage", "romantic", "festive", "traditional",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let synonyms: HashMap<String, Vec<String>> = [
            ("wedding", vec!["marriage", "nuptials"]),
            ("party", vec!["celebration", "bash"]),
            ("cheap", vec!["affordable", "budget"]),
            ("food", vec!["catering", "cuisine"]),
            ("venue", vec!["location", "space"]),
            ("music", vec!["band", "dj"]),
            ("outdoor", vec!["outside", "garden"]),
            ("fancy", vec!["elegant", "upscale"]),
            ("corporate", vec!["business", "company"]),
            ("bbq", vec!["barbecue", "grill"]),
        ]
        .into_iter()
        .map(|(k, v)| {
            (
                k.to_string(),
                v.into_iter().map(|s| s.to_string()).collect(),
            )
        })
        .collect();

        let vague_adjectives = ["nice", "good", "great", "cool", "awesome", "amazing", "best"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let popular_queries = [
            "outdoor wedding venue",
            "bbq catering for 100 guests",
            "rustic barn wedding package",
            "corporate event space downtown",
            "birthday party with dj",
            "beach wedding package",
            "vegan catering options",
            "rooftop cocktail reception",
            "elegant ballroom gala",
            "garden party catering",
            "live band for wedding reception",
            "affordable banquet hall",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        Self {
            vocabulary,
            synonyms,
            vague_adjectives,
            popular_queries,
        }
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Synonyms for a token, in table order
    pub fn synonyms_for(&self, word: &str) -> Option<&[String]> {
        self.synonyms.get(word).map(|v| v.as_slice())
    }

    pub fn is_vague(&self, word: &str) -> bool {
        self.vague_adjectives.iter().any(|v| v == word)
    }

    pub fn popular_queries(&self) -> &[String] {
        &self.popular_queries
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::default_domain()
    }
}
