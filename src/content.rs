//! Card images and copy
//!
//! Defaults are baked in; a page can override any field with a JSON blob in
//! `<script id="card-config" type="application/json">`.

use serde::{Deserialize, Serialize};

use crate::sim::Answer;

/// Per-answer values. Overriding the table replaces all four entries.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PerAnswer {
    pub yes: String,
    pub no: String,
    pub maybe: String,
    pub blushed: String,
}

impl PerAnswer {
    pub fn get(&self, answer: Answer) -> &str {
        match answer {
            Answer::Yes => &self.yes,
            Answer::No => &self.no,
            Answer::Maybe => &self.maybe,
            Answer::Blushed => &self.blushed,
        }
    }
}

/// Image URLs (opaque to the card, fetched by the browser)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Images {
    /// Shown framed above the winner
    pub results: PerAnswer,
    pub front_cover: String,
    pub tree_fox: String,
    pub fox: String,
    pub side_pattern: String,
    pub him: String,
    pub her: String,
}

impl Default for Images {
    fn default() -> Self {
        const BASE: &str = "https://raw.githubusercontent.com/BurgundVelvet";
        Self {
            results: PerAnswer {
                yes: format!("{BASE}/Yes/main/Yes.PNG"),
                no: format!("{BASE}/No/main/No.PNG"),
                maybe: format!("{BASE}/Maybe/main/Maybe.PNG"),
                blushed: format!("{BASE}/Blushed/main/Blushed.PNG"),
            },
            front_cover: format!("{BASE}/FrontPage/main/FrontPage.JPG"),
            tree_fox: format!("{BASE}/TreeFox/main/TreeFox.PNG"),
            fox: format!("{BASE}/Fox/main/Fox.PNG"),
            side_pattern: "https://images.unsplash.com/photo-1607597561332-68b2488bd732?auto=format&fit=crop&w=200&q=80".to_string(),
            him: format!("{BASE}/Him/main/Him.PNG"),
            her: format!("{BASE}/Her/main/Her.PNG"),
        }
    }
}

/// Footer and hint copy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Card closed
    pub closed: String,
    /// Card open, nothing pressed yet
    pub open: String,
    /// A bunny is on the loose
    pub playing: String,
    /// Hint under the footer before the game starts
    pub hint: String,
    /// Footer once an answer is caught. `*text*` renders cursive.
    pub results: PerAnswer,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            closed: "Click the card to open".to_string(),
            open: "CLICK ON THE LEFT SIDE OF THE PAGE TO CLOSE".to_string(),
            playing: "Can you catch this bunny?)".to_string(),
            hint: "Please press on your answer".to_string(),
            results: PerAnswer {
                yes: "His eyes widen, he jumps, he swirls... He feels touched.\n\
                      He hugs her firmly and smiles.\n\
                      And allows himself to hope."
                    .to_string(),
                no: "He looks down... Then up again. He wants her to know that he understands \
                     if she has worries, finds it too early, or has other reasons to say no. \
                     After telling her that, he looks at her and asks: \"Why not?\" with a shy voice."
                    .to_string(),
                maybe: "His heart makes a hiccup. He looks at her. He wants her to know that he \
                        understands if she thinks its too early or has other worries."
                    .to_string(),
                blushed: "Breath in, breath out. Whatever you decide, I don't plan to go anywhere. \
                          Well, other then Minsk, ) But I understand if you have to think about it \
                          and give it time."
                    .to_string(),
            },
        }
    }
}

/// Everything the page shows that isn't layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CardContent {
    pub question: String,
    pub poem: Vec<String>,
    pub images: Images,
    pub messages: Messages,
}

impl Default for CardContent {
    fn default() -> Self {
        Self {
            question: "Would you want me to visit you in Minsk this December?".to_string(),
            poem: vec![
                "Two foxes at night".to_string(),
                "Autumn stirs their gentle hearts".to_string(),
                "Winter scents...touch bright?".to_string(),
            ],
            images: Images::default(),
            messages: Messages::default(),
        }
    }
}

impl CardContent {
    /// DOM id of the optional JSON override
    pub const CONFIG_ELEMENT_ID: &'static str = "card-config";

    pub fn result_message(&self, answer: Answer) -> &str {
        self.messages.results.get(answer)
    }

    pub fn result_image(&self, answer: Answer) -> &str {
        self.images.results.get(answer)
    }

    /// Parse an override blob; missing fields keep their defaults
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(content) => Some(content),
            Err(e) => {
                log::warn!("Ignoring malformed card config: {}", e);
                None
            }
        }
    }

    /// Load from the page's config element (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(content) = json.as_deref().and_then(Self::from_json) {
            log::info!("Loaded card content from #{}", Self::CONFIG_ELEMENT_ID);
            return content;
        }

        log::info!("Using default card content");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
