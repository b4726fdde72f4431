//! Scraping a character sheet page into a [`CharacterRecord`].
//!
//! Extraction never fails: a cell that is missing from the page reads as an
//! empty string.

use scraper::{Html, Selector};
use udon5e_common::{
    Abilities, Ability, Attack, CharacterRecord, Notes, Skills, SpellLevel, Spellbook,
};

use crate::layout::{self, AttackColumn, SpellBlock};

/// Positional text lookups over a parsed sheet page.
#[derive(Clone, Copy)]
pub struct Sheet<'a> {
    html: &'a Html,
}

impl<'a> Sheet<'a> {
    /// Wrap a parsed page (decoded to UTF-8 before parsing).
    pub fn new(html: &'a Html) -> Self {
        Self { html }
    }

    /// Text of every element matching `css`, concatenated in document order.
    pub fn raw_text(&self, css: &str) -> String {
        let Some(selector) = compile(css) else {
            return String::new();
        };

        self.html
            .select(&selector)
            .flat_map(|element| element.text())
            .collect()
    }

    /// [`raw_text`](Self::raw_text) with surrounding whitespace removed.
    pub fn text(&self, css: &str) -> String {
        self.raw_text(css).trim().to_string()
    }

    /// Attribute of the first element matching `css`, trimmed.
    pub fn attr(&self, css: &str, name: &str) -> String {
        let Some(selector) = compile(css) else {
            return String::new();
        };

        self.html
            .select(&selector)
            .next()
            .and_then(|element| element.value().attr(name))
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    }

    /// Read the whole record.
    pub fn extract(&self) -> CharacterRecord {
        let record = CharacterRecord {
            name: self.text(layout::NAME),
            image_url: self.attr(layout::IMAGE, "src"),
            alignment: self.text(layout::ALIGNMENT),
            player: self.text(layout::PLAYER),
            classes: self.text(layout::CLASSES),
            level: self.text(layout::LEVEL),
            race: self.text(layout::RACE),
            size: self.text(layout::SIZE),
            sex: self.text(layout::SEX),
            age: self.text(layout::AGE),

            armor_class: self.text(layout::ARMOR_CLASS),
            initiative: self.text(layout::INITIATIVE),
            speed: self.text(layout::SPEED),

            abilities: Abilities::from_fn(|a| self.text(&layout::ability_score(a))),
            ability_modifiers: self.ability_modifiers(),
            proficiency_bonus: self.text(layout::PROFICIENCY_BONUS),
            saves: Abilities::from_fn(|a| self.text(&layout::saving_throw(a))),
            hit_points: self.text(layout::HIT_POINTS),
            hit_dice: self.text(layout::HIT_DICE),
            skills: Skills::from_fn(|s| self.text(&layout::skill(s))),

            attacks: self.attacks(),

            spell_save_dc: self.text(layout::SPELL_SAVE_DC),
            spell_attack: self.text(layout::SPELL_ATTACK),
            spellbook: self.spellbook(),

            notes: self.notes(),
        };

        tracing::debug!(
            name = %record.name,
            attacks = record.attacks.len(),
            spell_levels = record.spellbook.known_levels().count(),
            "extracted character sheet"
        );

        record
    }

    /// Blank modifier cells read as `"0"`.
    fn ability_modifiers(&self) -> Abilities {
        Abilities::from_fn(|ability: Ability| {
            let value = self.text(&layout::ability_modifier(ability));
            if value.is_empty() {
                "0".to_string()
            } else {
                value
            }
        })
    }

    /// Every slot is probed; a slot with a blank name is an unused row.
    fn attacks(&self) -> Vec<Attack> {
        (0..layout::ATTACK_SLOTS)
            .filter_map(|slot| {
                let cell = |column| self.text(&layout::attack_cell(slot, column));

                let name = cell(AttackColumn::Name);
                if name.is_empty() {
                    return None;
                }

                Some(Attack {
                    name,
                    bonus: cell(AttackColumn::Bonus),
                    damage: cell(AttackColumn::Damage),
                    damage_type: cell(AttackColumn::DamageType),
                    note: cell(AttackColumn::Note),
                })
            })
            .collect()
    }

    fn spellbook(&self) -> Spellbook {
        let mut book = Spellbook::new();

        for level in SpellLevel::ALL {
            let block = SpellBlock::for_level(level);

            if let Some(css) = block.slot_selector() {
                book.set_slots(level, self.text(&css));
            }

            let spells = block
                .spell_selectors()
                .map(|css| self.text(&css))
                .filter(|spell| !spell.is_empty())
                .collect();
            book.set_spells(level, spells);
        }

        book
    }

    /// Narrative fields keep their whitespace and line breaks.
    fn notes(&self) -> Notes {
        Notes {
            background: self.raw_text(layout::BACKGROUND),
            personality_traits: self.raw_text(&layout::personality_note(0)),
            ideals: self.raw_text(&layout::personality_note(1)),
            bonds: self.raw_text(&layout::personality_note(2)),
            flaws: self.raw_text(&layout::personality_note(3)),
            character_design: self.raw_text(&layout::personality_note(4)),
            proficiencies_and_languages: self.raw_text(layout::PROFICIENCIES_AND_LANGUAGES),
            features_and_traits: self.raw_text(layout::FEATURES_AND_TRAITS),
        }
    }
}

/// Extract a record from a parsed page.
pub fn extract(html: &Html) -> CharacterRecord {
    Sheet::new(html).extract()
}

/// Parse page markup and extract a record from it.
pub fn extract_html(markup: &str) -> CharacterRecord {
    extract(&Html::parse_document(markup))
}

fn compile(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!(selector = css, error = %e, "unparsable selector");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use udon5e_common::Skill;

    /// A page skeleton with just enough structure to reach the attack table.
    fn attack_page(rows: &[[&str; 5]]) -> String {
        let mut attack_rows = String::from("<tr><td>head</td></tr><tr><td>labels</td></tr>");
        for cells in rows {
            attack_rows.push_str("<tr>");
            for cell in cells {
                attack_rows.push_str(&format!("<td><div>{}</div></td>", cell));
            }
            attack_rows.push_str("</tr><tr><td>spacer</td></tr>");
        }

        let filler = "<table><tbody><tr><td></td></tr></tbody></table>".repeat(7);
        format!(
            "<html><head><title>Hero</title></head><body>{}\
             <table><tbody><tr><td></td>\
             <td><table><tbody>{}</tbody></table></td>\
             </tr></tbody></table></body></html>",
            filler, attack_rows
        )
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let record = extract_html("<html><head></head><body></body></html>");

        assert_eq!(record.name, "");
        assert_eq!(record.image_url, "");
        assert_eq!(record.armor_class, "");
        assert_eq!(record.abilities.get(Ability::Str), "");
        assert_eq!(record.skills.get(Skill::Arcana), "");
        assert!(record.attacks.is_empty());
        assert!(record.spellbook.is_empty());
        assert_eq!(record.spellbook.slots(SpellLevel::new(3).unwrap()), Some(""));
    }

    #[test]
    fn test_blank_ability_modifiers_default_to_zero() {
        let record = extract_html("<html><body></body></html>");
        for (_, value) in record.ability_modifiers.iter() {
            assert_eq!(value, "0");
        }
    }

    #[test]
    fn test_title_and_image() {
        let record = extract_html(
            "<html><head><title>  Test Hero \n</title></head>\
             <body><img src=\" https://example.com/a.png \"><img src=\"b.png\"></body></html>",
        );
        assert_eq!(record.name, "Test Hero");
        assert_eq!(record.image_url, "https://example.com/a.png");
    }

    #[test]
    fn test_attacks_skip_blank_names() {
        let page = attack_page(&[
            ["ロングソード", "+5", "1d8+3", "斬撃", "汎用"],
            ["", "+4", "1d6", "刺突", "blank name"],
            ["ショートボウ", "4", "1d6+2", "", ""],
        ]);
        let record = extract_html(&page);

        assert_eq!(record.attacks.len(), 2);
        assert_eq!(record.attacks[0].name, "ロングソード");
        assert_eq!(record.attacks[0].damage_type, "斬撃");
        assert_eq!(record.attacks[1].name, "ショートボウ");
        assert_eq!(record.attacks[1].bonus, "4");
        assert_eq!(record.attacks[1].note, "");
    }

    #[test]
    fn test_raw_text_keeps_line_breaks() {
        let html = Html::parse_document("<html><body><div>  line one\nline two  </div></body></html>");
        let doc = Sheet::new(&html);
        assert_eq!(doc.raw_text("body > div"), "  line one\nline two  ");
        assert_eq!(doc.text("body > div"), "line one\nline two");
    }

    #[test]
    fn test_text_concatenates_all_matches() {
        let html = Html::parse_document("<html><body><p>a</p><p>b</p></body></html>");
        let doc = Sheet::new(&html);
        assert_eq!(doc.text("p"), "ab");
    }

    #[test]
    fn test_bad_selector_reads_empty() {
        let html = Html::parse_document("<html><body><p>a</p></body></html>");
        let doc = Sheet::new(&html);
        assert_eq!(doc.text("p:::"), "");
        assert_eq!(doc.attr("[[", "src"), "");
    }
}
