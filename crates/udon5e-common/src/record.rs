//! The character record produced by scraping one sheet.
//!
//! Every value is kept as the text shown on the sheet. Cells that are missing
//! from the page are empty strings, never absent.

use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

/// One of the six abilities, in sheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Ability {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

impl Ability {
    /// All abilities in sheet order.
    pub const ALL: [Ability; 6] = [
        Ability::Str,
        Ability::Dex,
        Ability::Con,
        Ability::Int,
        Ability::Wis,
        Ability::Cha,
    ];


    /// Japanese label as printed on the sheet (`筋力`, ...).
    pub const fn label(self) -> &'static str {
        match self {
            Ability::Str => "筋力",
            Ability::Dex => "敏捷力",
            Ability::Con => "耐久力",
            Ability::Int => "知力",
            Ability::Wis => "判断力",
            Ability::Cha => "魅力",
        }
    }

    /// One-character abbreviation used next to skills (`筋`, ...).
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Ability::Str => "筋",
            Ability::Dex => "敏",
            Ability::Con => "耐",
            Ability::Int => "知",
            Ability::Wis => "判",
            Ability::Cha => "魅",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A value for each of the six abilities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Abilities {
    pub str: String,
    pub dex: String,
    pub con: String,
    pub int: String,
    pub wis: String,
    pub cha: String,
}

impl Abilities {
    /// Build the group by reading each ability in sheet order.
    pub fn from_fn(mut f: impl FnMut(Ability) -> String) -> Self {
        Self {
            str: f(Ability::Str),
            dex: f(Ability::Dex),
            con: f(Ability::Con),
            int: f(Ability::Int),
            wis: f(Ability::Wis),
            cha: f(Ability::Cha),
        }
    }

    /// Value for one ability.
    pub fn get(&self, ability: Ability) -> &str {
        match ability {
            Ability::Str => &self.str,
            Ability::Dex => &self.dex,
            Ability::Con => &self.con,
            Ability::Int => &self.int,
            Ability::Wis => &self.wis,
            Ability::Cha => &self.cha,
        }
    }

    /// Iterate `(ability, value)` pairs in sheet order.
    pub fn iter(&self) -> impl Iterator<Item = (Ability, &str)> {
        Ability::ALL.into_iter().map(move |a| (a, self.get(a)))
    }
}

/// The 18 skills, in the order the sheet lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Skill {
    Intimidation,
    Medicine,
    Athletics,
    Stealth,
    Acrobatics,
    Insight,
    Performance,
    Nature,
    Religion,
    Survival,
    Persuasion,
    Investigation,
    Perception,
    SleightOfHand,
    AnimalHandling,
    Deception,
    Arcana,
    History,
}

impl Skill {
    /// All skills in canonical sheet order.
    pub const ALL: [Skill; 18] = [
        Skill::Intimidation,
        Skill::Medicine,
        Skill::Athletics,
        Skill::Stealth,
        Skill::Acrobatics,
        Skill::Insight,
        Skill::Performance,
        Skill::Nature,
        Skill::Religion,
        Skill::Survival,
        Skill::Persuasion,
        Skill::Investigation,
        Skill::Perception,
        Skill::SleightOfHand,
        Skill::AnimalHandling,
        Skill::Deception,
        Skill::Arcana,
        Skill::History,
    ];

    /// Label including the sheet's angle brackets (`〈威圧〉`, ...).
    pub const fn label(self) -> &'static str {
        match self {
            Skill::Intimidation => "〈威圧〉",
            Skill::Medicine => "〈医術〉",
            Skill::Athletics => "〈運動〉",
            Skill::Stealth => "〈隠密〉",
            Skill::Acrobatics => "〈軽業〉",
            Skill::Insight => "〈看破〉",
            Skill::Performance => "〈芸能〉",
            Skill::Nature => "〈自然〉",
            Skill::Religion => "〈宗教〉",
            Skill::Survival => "〈生存〉",
            Skill::Persuasion => "〈説得〉",
            Skill::Investigation => "〈捜査〉",
            Skill::Perception => "〈知覚〉",
            Skill::SleightOfHand => "〈手先の早業〉",
            Skill::AnimalHandling => "〈動物使い〉",
            Skill::Deception => "〈ペテン〉",
            Skill::Arcana => "〈魔法学〉",
            Skill::History => "〈歴史〉",
        }
    }

    /// The ability this skill is checked with.
    pub const fn ability(self) -> Ability {
        match self {
            Skill::Athletics => Ability::Str,
            Skill::Stealth | Skill::Acrobatics | Skill::SleightOfHand => Ability::Dex,
            Skill::Nature | Skill::Religion | Skill::Investigation | Skill::Arcana | Skill::History => {
                Ability::Int
            }
            Skill::Medicine
            | Skill::Insight
            | Skill::Survival
            | Skill::Perception
            | Skill::AnimalHandling => Ability::Wis,
            Skill::Intimidation | Skill::Performance | Skill::Persuasion | Skill::Deception => {
                Ability::Cha
            }
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Modifier text for each of the 18 skills.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Skills {
    values: [String; 18],
}

impl Skills {
    /// Build the group by reading each skill in canonical order.
    pub fn from_fn(f: impl FnMut(Skill) -> String) -> Self {
        Self {
            values: Skill::ALL.map(f),
        }
    }

    /// Modifier for one skill.
    pub fn get(&self, skill: Skill) -> &str {
        &self.values[skill.index()]
    }

    /// Iterate `(skill, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Skill, &str)> {
        Skill::ALL.into_iter().map(move |s| (s, self.get(s)))
    }
}

/// One row of the sheet's attack table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Attack {
    pub name: String,
    pub bonus: String,
    pub damage: String,
    pub damage_type: String,
    pub note: String,
}

/// A spell level from 0 (cantrips) to 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SpellLevel(u8);

impl SpellLevel {
    /// Cantrips.
    pub const CANTRIP: SpellLevel = SpellLevel(0);

    /// All levels, cantrips first.
    pub const ALL: [SpellLevel; 10] = [
        SpellLevel(0),
        SpellLevel(1),
        SpellLevel(2),
        SpellLevel(3),
        SpellLevel(4),
        SpellLevel(5),
        SpellLevel(6),
        SpellLevel(7),
        SpellLevel(8),
        SpellLevel(9),
    ];

    /// Create a level, returning `None` above 9.
    pub const fn new(level: u8) -> Option<Self> {
        if level <= 9 {
            Some(SpellLevel(level))
        } else {
            None
        }
    }

    /// Numeric level.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Whether this level is cantrips, which have no slots.
    pub const fn is_cantrip(self) -> bool {
        self.0 == 0
    }

    /// Key used by the sheet and the XML output (`lv0`..`lv9`).
    pub fn key(self) -> String {
        format!("lv{}", self.0)
    }
}

impl fmt::Display for SpellLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lv{}", self.0)
    }
}

/// Spell lists per level plus the slot counts for levels 1-9.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Spellbook {
    lists: [Vec<String>; 10],
    slots: [String; 9],
}

impl Spellbook {
    /// Create an empty spellbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spells known at a level, in sheet order.
    pub fn spells(&self, level: SpellLevel) -> &[String] {
        &self.lists[level.0 as usize]
    }

    /// Slot count for a level; `None` for cantrips.
    pub fn slots(&self, level: SpellLevel) -> Option<&str> {
        if level.is_cantrip() {
            None
        } else {
            Some(&self.slots[level.0 as usize - 1])
        }
    }

    /// Replace the spell list of a level.
    pub fn set_spells(&mut self, level: SpellLevel, spells: Vec<String>) {
        self.lists[level.0 as usize] = spells;
    }

    /// Set the slot count of a level. Ignored for cantrips.
    pub fn set_slots(&mut self, level: SpellLevel, slots: impl Into<String>) {
        if !level.is_cantrip() {
            self.slots[level.0 as usize - 1] = slots.into();
        }
    }

    /// Levels that have at least one spell, lowest first.
    pub fn known_levels(&self) -> impl Iterator<Item = (SpellLevel, &[String])> {
        SpellLevel::ALL
            .into_iter()
            .map(move |l| (l, self.spells(l)))
            .filter(|(_, spells)| !spells.is_empty())
    }

    /// Whether no level has any spell.
    pub fn is_empty(&self) -> bool {
        self.lists.iter().all(Vec::is_empty)
    }
}

/// Free-text sections of the sheet, kept with their line breaks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Notes {
    pub background: String,
    pub personality_traits: String,
    pub ideals: String,
    pub bonds: String,
    pub flaws: String,
    pub character_design: String,
    pub proficiencies_and_languages: String,
    pub features_and_traits: String,
}

/// Everything read from one character sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CharacterRecord {
    pub name: String,
    pub image_url: String,
    /// The sheet's "attribute" cell (alignment).
    pub alignment: String,
    pub player: String,
    pub classes: String,
    pub level: String,
    pub race: String,
    pub size: String,
    pub sex: String,
    pub age: String,

    pub armor_class: String,
    pub initiative: String,
    pub speed: String,

    pub abilities: Abilities,
    pub ability_modifiers: Abilities,
    pub proficiency_bonus: String,
    pub saves: Abilities,
    pub hit_points: String,
    pub hit_dice: String,
    pub skills: Skills,

    pub attacks: Vec<Attack>,

    pub spell_save_dc: String,
    pub spell_attack: String,
    pub spellbook: Spellbook,

    pub notes: Notes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ability_order_and_labels() {
        let abbreviations: Vec<_> = Ability::ALL.iter().map(|a| a.abbreviation()).collect();
        assert_eq!(abbreviations, ["筋", "敏", "耐", "知", "判", "魅"]);
        assert_eq!(Ability::Dex.label(), "敏捷力");
        assert_eq!(Ability::Wis.abbreviation(), "判");
    }

    #[test]
    fn test_abilities_from_fn() {
        let abilities = Abilities::from_fn(|a| a.abbreviation().to_string());
        assert_eq!(abilities.get(Ability::Con), "耐");
        let collected: Vec<_> = abilities.iter().map(|(_, v)| v.to_string()).collect();
        assert_eq!(collected, ["筋", "敏", "耐", "知", "判", "魅"]);
    }

    #[test]
    fn test_skill_governing_abilities() {
        assert_eq!(Skill::Intimidation.ability(), Ability::Cha);
        assert_eq!(Skill::Athletics.ability(), Ability::Str);
        assert_eq!(Skill::SleightOfHand.ability(), Ability::Dex);
        assert_eq!(Skill::Arcana.ability(), Ability::Int);
        assert_eq!(Skill::AnimalHandling.ability(), Ability::Wis);
        assert_eq!(Skill::ALL.len(), 18);
    }

    #[test]
    fn test_skills_lookup() {
        let skills = Skills::from_fn(|s| s.label().to_string());
        assert_eq!(skills.get(Skill::History), "〈歴史〉");
        assert_eq!(skills.iter().next().map(|(s, _)| s), Some(Skill::Intimidation));
    }

    #[test]
    fn test_spellbook_slots_and_levels() {
        let mut book = Spellbook::new();
        assert!(book.is_empty());
        assert_eq!(book.slots(SpellLevel::CANTRIP), None);

        let lv1 = SpellLevel::new(1).unwrap();
        book.set_spells(lv1, vec!["マジック・ミサイル".to_string()]);
        book.set_slots(lv1, "2");
        book.set_slots(SpellLevel::CANTRIP, "9");

        assert!(!book.is_empty());
        assert_eq!(book.slots(lv1), Some("2"));
        assert_eq!(book.slots(SpellLevel::CANTRIP), None);

        let levels: Vec<_> = book.known_levels().map(|(l, _)| l).collect();
        assert_eq!(levels, [lv1]);
        assert_eq!(lv1.key(), "lv1");
        assert!(SpellLevel::new(10).is_none());
    }
}
