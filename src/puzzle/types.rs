use serde::{Deserialize, Serialize};

/// Most tiles the letter wheel can hold.
pub const MAX_WHEEL_LETTERS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicType {
    CompoundWord,
    SyllableSmash,
    LetterSound,
    Homophone,
    SymbolSub,
    NumberSub,
    VisualPosition,
    Subtraction,
    Reversal,
}

impl LogicType {
    pub fn display_name(&self) -> &'static str {
        match self {
            LogicType::CompoundWord => "Compound Word",
            LogicType::SyllableSmash => "Syllable Smash",
            LogicType::LetterSound => "Letter Sound",
            LogicType::Homophone => "Homophone",
            LogicType::SymbolSub => "Symbol Substitution",
            LogicType::NumberSub => "Number Substitution",
            LogicType::VisualPosition => "Visual Position",
            LogicType::Subtraction => "Subtraction",
            LogicType::Reversal => "Reversal",
        }
    }

    /// Nominal difficulty of the technique. Puzzles carry their own rating.
    pub fn difficulty(&self) -> u8 {
        match self {
            LogicType::CompoundWord | LogicType::SyllableSmash | LogicType::LetterSound => 1,
            LogicType::Homophone | LogicType::SymbolSub | LogicType::NumberSub => 2,
            LogicType::VisualPosition | LogicType::Subtraction | LogicType::Reversal => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleExplanation {
    pub breakdown: String,
    pub logic_type: LogicType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    #[serde(rename = "puzzle_id")]
    pub id: String,
    pub context_tag: String,
    pub puzzle_image: String,
    pub answer: String,
    pub letters: Vec<String>,
    #[serde(default)]
    pub distractor_letters: Vec<String>,
    pub difficulty: u8,
    /// Zero-based indices into the answer that start pre-filled.
    #[serde(default)]
    pub anchor_letters: Vec<usize>,
    pub explanation: PuzzleExplanation,
    #[serde(default)]
    pub background: Option<String>,
}

impl Puzzle {
    /// Answer letters followed by as many distractors as fit. Not shuffled.
    pub fn wheel_letters(&self) -> Vec<String> {
        if self.letters.len() >= MAX_WHEEL_LETTERS {
            return self.letters[..MAX_WHEEL_LETTERS].to_vec();
        }

        let remaining_slots = MAX_WHEEL_LETTERS - self.letters.len();
        self.letters
            .iter()
            .chain(self.distractor_letters.iter().take(remaining_slots))
            .cloned()
            .collect()
    }

    pub fn moonstone_reward(&self) -> u32 {
        match self.difficulty {
            1 => 10,
            2 => 20,
            3 => 30,
            _ => 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpiritRarity {
    Common,
    Rare,
    Legendary,
}

impl SpiritRarity {
    pub fn display_name(&self) -> &'static str {
        match self {
            SpiritRarity::Common => "COMMON",
            SpiritRarity::Rare => "RARE",
            SpiritRarity::Legendary => "LEGENDARY",
        }
    }

    /// Display colour as RGB.
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            SpiritRarity::Common => (168, 168, 168),
            SpiritRarity::Rare => (92, 156, 214),
            SpiritRarity::Legendary => (255, 214, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spirit {
    #[serde(rename = "spirit_id")]
    pub id: String,
    pub name: String,
    pub rarity: SpiritRarity,
    pub lore: String,
    pub sticker_image: String,
    #[serde(default)]
    pub silhouette_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarPosition {
    pub puzzle_id: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constellation {
    #[serde(rename = "constellation_id")]
    pub id: String,
    pub name: String,
    pub order: u32,
    /// Completed puzzles needed to open the next constellation.
    pub unlock_threshold: usize,
    pub background: String,
    #[serde(default)]
    pub background_video: Option<String>,
    #[serde(default)]
    pub puzzles: Vec<Puzzle>,
    #[serde(default)]
    pub star_positions: Option<Vec<StarPosition>>,
    #[serde(default)]
    pub connections: Option<Vec<[usize; 2]>>,
    #[serde(default)]
    pub spirit_reward: Option<Spirit>,
}

impl Constellation {
    pub fn total_puzzles(&self) -> usize {
        self.puzzles.len()
    }
}
