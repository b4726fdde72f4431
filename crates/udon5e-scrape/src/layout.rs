//! Positional layout of the dndjp character sheet page.
//!
//! The page has no ids or field names; every value is found by its position in
//! a fixed skeleton of nested tables. All of those positions live here, so a
//! change to the page layout is a change to this table only.
//!
//! Top-level tables, counted as children of `<body>`:
//!
//! | child | contents                                          |
//! |-------|---------------------------------------------------|
//! | 5     | profile (alignment, player, class, race, ...)     |
//! | 6     | initiative, AC, speed                             |
//! | 7     | abilities, proficiency, saves, HP, hit dice       |
//! | 8     | skills, attacks, personality notes                |
//! | 9     | other proficiencies, features                     |
//! | 10    | spellcasting save DC and attack                   |
//! | 12    | spell slots and spell lists                       |

use udon5e_common::{Ability, Skill, SpellLevel};

/// Document title, which carries the character name.
pub const NAME: &str = "title";

/// First image on the page.
pub const IMAGE: &str = "img";

pub const ALIGNMENT: &str =
    "body > table:nth-child(5) > tbody > tr:nth-child(2) > td:nth-child(2) > div > b";
pub const PLAYER: &str =
    "body > table:nth-child(5) > tbody > tr:nth-child(2) > td:nth-child(3) > div > b";
pub const CLASSES: &str =
    "body > table:nth-child(5) > tbody > tr:nth-child(3) > td:nth-child(1) > div > b";
pub const LEVEL: &str =
    "body > table:nth-child(5) > tbody > tr:nth-child(3) > td:nth-child(2) > div > b";
pub const RACE: &str =
    "body > table:nth-child(5) > tbody > tr:nth-child(4) > td:nth-child(1) > div > b";
pub const SIZE: &str =
    "body > table:nth-child(5) > tbody > tr:nth-child(4) > td:nth-child(2) > div > b";
pub const AGE: &str =
    "body > table:nth-child(5) > tbody > tr:nth-child(4) > td:nth-child(3) > div > b";
pub const SEX: &str =
    "body > table:nth-child(5) > tbody > tr:nth-child(4) > td:nth-child(4) > div > b";

pub const INITIATIVE: &str = "body > table:nth-child(6) > tbody > tr > td:nth-child(1) > table > tbody > tr.LWC > td:nth-child(1) > div > b";
pub const ARMOR_CLASS: &str = "body > table:nth-child(6) > tbody > tr > td:nth-child(2) > table > tbody > tr.LWC > td:nth-child(1) > div > b";
pub const SPEED: &str = "body > table:nth-child(6) > tbody > tr > td:nth-child(3) > table > tbody > tr.MWC > td:nth-child(1) > div > b";

/// Inner table holding one row per ability (rows 2-7).
const ABILITY_TABLE: &str = "body > table:nth-child(7) > tbody > tr > td:nth-child(1) > table > tbody > tr.MBC > td > table > tbody";

pub const PROFICIENCY_BONUS: &str = "body > table:nth-child(7) > tbody > tr > td:nth-child(2) > table:nth-child(1) > tbody > tr.MWC > td:nth-child(4) > div > b";

/// Saving throw table, one row per ability (rows 2-7).
const SAVE_TABLE: &str =
    "body > table:nth-child(7) > tbody > tr > td:nth-child(2) > table:nth-child(2) > tbody";

pub const HIT_POINTS: &str = "body > table:nth-child(7) > tbody > tr > td:nth-child(3) > table > tbody > tr:nth-child(5) > td:nth-child(1) > div > b";
pub const HIT_DICE: &str = "body > table:nth-child(7) > tbody > tr > td:nth-child(3) > table > tbody > tr:nth-child(7) > td:nth-child(2) > div";

/// Skill table, one row per skill (rows 3-20) in canonical order.
const SKILL_TABLE: &str =
    "body > table:nth-child(8) > tbody > tr:nth-child(1) > td:nth-child(1) > table > tbody";

/// Attack table; attacks sit on every other row starting at row 3.
const ATTACK_TABLE: &str =
    "body > table:nth-child(8) > tbody > tr:nth-child(1) > td:nth-child(2) > table > tbody";

/// Number of attack rows the sheet offers.
pub const ATTACK_SLOTS: usize = 6;

const NOTE_TABLE: &str =
    "body > table:nth-child(8) > tbody > tr:nth-child(1) > td:nth-child(3) > table > tbody";

pub const BACKGROUND: &str = "body > table:nth-child(8) > tbody > tr:nth-child(1) > td:nth-child(3) > table > tbody > tr:nth-child(3) > td > div";
pub const PROFICIENCIES_AND_LANGUAGES: &str = "body > table:nth-child(9) > tbody > tr:nth-child(1) > td:nth-child(1) > table:nth-child(1) > tbody > tr.SBL > td > div";
pub const FEATURES_AND_TRAITS: &str = "body > table:nth-child(9) > tbody > tr:nth-child(1) > td:nth-child(3) > table > tbody > tr:nth-child(3) > td > div";

pub const SPELL_SAVE_DC: &str =
    "body > table:nth-child(10) > tbody > tr:nth-child(4) > td:nth-child(6) > div > b";
pub const SPELL_ATTACK: &str =
    "body > table:nth-child(10) > tbody > tr:nth-child(4) > td:nth-child(8) > div > b";

/// Ability score cell.
pub fn ability_score(ability: Ability) -> String {
    format!(
        "{} tr:nth-child({}) > td:nth-child(1) > div > b",
        ABILITY_TABLE,
        ability as u32 + 2
    )
}

/// Ability modifier cell.
pub fn ability_modifier(ability: Ability) -> String {
    format!(
        "{} tr:nth-child({}) > td:nth-child(3) > div > b",
        ABILITY_TABLE,
        ability as u32 + 2
    )
}

/// Saving throw modifier cell.
pub fn saving_throw(ability: Ability) -> String {
    format!(
        "{} tr:nth-child({}) > td:nth-child(2) > div > b",
        SAVE_TABLE,
        ability as u32 + 2
    )
}

/// Skill modifier cell.
pub fn skill(skill: Skill) -> String {
    format!(
        "{} tr:nth-child({}) > td:nth-child(1) > center > div > b",
        SKILL_TABLE,
        skill as u32 + 3
    )
}

/// Columns of an attack row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackColumn {
    Name = 1,
    Bonus = 2,
    Damage = 3,
    DamageType = 4,
    Note = 5,
}

/// Cell of an attack slot (`slot` counts from 0).
pub fn attack_cell(slot: usize, column: AttackColumn) -> String {
    format!(
        "{} tr:nth-child({}) > td:nth-child({}) > div",
        ATTACK_TABLE,
        3 + slot * 2,
        column as u32
    )
}

/// Personality note rows: traits, ideals, bonds, flaws, design notes.
pub fn personality_note(index: usize) -> String {
    format!("{} > tr:nth-child({}) > td > div", NOTE_TABLE, 7 + index * 4)
}

/// Where one spell level lives in the spell table.
#[derive(Debug, Clone, Copy)]
pub struct SpellBlock {
    /// Column (`td:nth-child`) of the outer spell table.
    pub column: u32,
    /// Row carrying the slot count, absent for cantrips.
    pub slot_row: Option<u32>,
    /// First row of the spell list.
    pub first_row: u32,
    /// Number of candidate rows in the list.
    pub rows: u32,
}

/// Spell blocks indexed by level.
pub const SPELL_BLOCKS: [SpellBlock; 10] = [
    SpellBlock { column: 1, slot_row: None, first_row: 4, rows: 10 },
    SpellBlock { column: 1, slot_row: Some(16), first_row: 18, rows: 13 },
    SpellBlock { column: 1, slot_row: Some(33), first_row: 35, rows: 13 },
    SpellBlock { column: 2, slot_row: Some(2), first_row: 4, rows: 13 },
    SpellBlock { column: 2, slot_row: Some(19), first_row: 21, rows: 11 },
    SpellBlock { column: 2, slot_row: Some(35), first_row: 37, rows: 10 },
    SpellBlock { column: 3, slot_row: Some(2), first_row: 4, rows: 10 },
    SpellBlock { column: 3, slot_row: Some(16), first_row: 18, rows: 8 },
    SpellBlock { column: 3, slot_row: Some(28), first_row: 30, rows: 7 },
    SpellBlock { column: 3, slot_row: Some(39), first_row: 41, rows: 6 },
];

impl SpellBlock {
    /// Block for a spell level.
    pub fn for_level(level: SpellLevel) -> &'static SpellBlock {
        &SPELL_BLOCKS[level.get() as usize]
    }

    fn table(&self) -> String {
        format!(
            "body > table:nth-child(12) > tbody > tr:nth-child(1) > td:nth-child({}) > table > tbody",
            self.column
        )
    }

    /// Slot count cell.
    pub fn slot_selector(&self) -> Option<String> {
        self.slot_row
            .map(|row| format!("{} > tr:nth-child({}) > td:nth-child(3) > div", self.table(), row))
    }

    /// One selector per candidate spell row, in order.
    pub fn spell_selectors(&self) -> impl Iterator<Item = String> + '_ {
        // Cantrip rows hold a single cell; leveled rows put the name in column 2.
        let cell = if self.slot_row.is_none() {
            "td > div"
        } else {
            "td:nth-child(2) > div"
        };
        let table = self.table();

        (self.first_row..self.first_row + self.rows)
            .map(move |row| format!("{} > tr:nth-child({}) > {}", table, row, cell))
    }
}
