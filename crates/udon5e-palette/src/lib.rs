//! Chat palettes for Udonarium.
//!
//! A chat palette is a plain-text list of roll macros shown next to a
//! character piece. Each line is either a section header or a command such as
//! `AR+2 【敏捷力】能力値判定`, where the leading token is the dice bot's roll
//! command and the modifier is either a number taken from the sheet or a
//! `{...}` reference to one of the piece's resources.

use udon5e_common::{format_modifier, Attack, CharacterRecord, Skill, SpellLevel};

/// The `roll_command` value that selects plain `1d20` rolls.
pub const DEFAULT_ROLL_COMMAND: &str = "default";

/// Roll command prefixes for attack rolls and checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollTokens {
    pub attack: &'static str,
    pub check: &'static str,
}

impl RollTokens {
    /// Plain dice for `"default"`, the dice bot's `AT`/`AR` commands otherwise.
    pub fn for_mode(roll_command: &str) -> Self {
        if roll_command == DEFAULT_ROLL_COMMAND {
            Self {
                attack: "1d20",
                check: "1d20",
            }
        } else {
            Self {
                attack: "AT",
                check: "AR",
            }
        }
    }
}

/// Build the chat palette for a character.
///
/// With `use_computed_values` every modifier is the formatted number from the
/// sheet; without it, ability, save and skill modifiers reference the piece's
/// resources (`{筋力修正}`, `{筋力セーヴ}`, `{〈威圧〉}`) so they follow later
/// edits in Udonarium.
pub fn build_chat_palette(
    record: &CharacterRecord,
    use_computed_values: bool,
    roll_command: &str,
) -> String {
    let palette = Palette {
        record,
        tokens: RollTokens::for_mode(roll_command),
        computed: use_computed_values,
    };

    let mut lines = Vec::new();
    palette.header(&mut lines);
    palette.attacks(&mut lines);
    palette.ability_checks(&mut lines);
    palette.saving_throws(&mut lines);
    palette.skills(&mut lines);
    lines.push("🌱 ===その他の能力===".to_string());
    lines.push(String::new());
    palette.spells(&mut lines);

    tracing::debug!(
        name = %record.name,
        lines = lines.len(),
        computed = use_computed_values,
        "built chat palette"
    );

    lines.join("\n")
}

struct Palette<'a> {
    record: &'a CharacterRecord,
    tokens: RollTokens,
    computed: bool,
}

impl Palette<'_> {
    fn header(&self, lines: &mut Vec<String>) {
        let r = self.record;
        lines.push(format!("◆チャットパレット {}(PL:{})", r.name, r.player));
        lines.push(format!(
            "▼ レベル {} {} / {} / {} / {}",
            r.level, r.classes, r.race, r.sex, r.alignment
        ));
        lines.push(format!("▼ 習熟ボーナス：{}", r.proficiency_bonus));
        lines.push(format!(
            "{}{} イニシアチブ",
            self.tokens.check,
            format_modifier(&r.initiative)
        ));
    }

    fn attacks(&self, lines: &mut Vec<String>) {
        lines.push("⚔️ ===攻撃===".to_string());
        for attack in &self.record.attacks {
            lines.push(format!(
                "{}{} {}の攻撃ロール",
                self.tokens.attack,
                format_modifier(&attack.bonus),
                attack.name
            ));
            lines.push(damage_line(attack));
        }
    }

    fn ability_checks(&self, lines: &mut Vec<String>) {
        lines.push("💪 ===能力値判定===".to_string());
        for (ability, value) in self.record.ability_modifiers.iter() {
            lines.push(format!(
                "{}{} 【{}】能力値判定",
                self.tokens.check,
                self.modifier(value, || format!("{}修正", ability.label())),
                ability.label()
            ));
        }
    }

    fn saving_throws(&self, lines: &mut Vec<String>) {
        lines.push("🛡️ ===セーヴィングスロー===".to_string());
        for (ability, value) in self.record.saves.iter() {
            lines.push(format!(
                "{}{} 【{}】セーヴィングスロー",
                self.tokens.check,
                self.modifier(value, || format!("{}セーヴ", ability.label())),
                ability.label()
            ));
        }
    }

    fn skills(&self, lines: &mut Vec<String>) {
        lines.push("🎲 ===技能===".to_string());
        for (skill, value) in self.record.skills.iter() {
            lines.push(skill_line(
                self.tokens.check,
                &self.modifier(value, || skill.label().to_string()),
                skill,
            ));
        }
    }

    /// Left out entirely when no level has a spell.
    fn spells(&self, lines: &mut Vec<String>) {
        let book = &self.record.spellbook;
        if book.is_empty() {
            return;
        }

        lines.push("🪄 ===呪文===".to_string());
        lines.push(format!("呪文セーヴ難易度：{}", self.record.spell_save_dc));
        lines.push(format!(
            "{}{} 呪文攻撃ロール",
            self.tokens.attack,
            format_modifier(&self.record.spell_attack)
        ));
        lines.push("📖 ===呪文リスト===".to_string());

        for (level, spells) in book.known_levels() {
            lines.push(format!("{} ==={}呪文===", keycap(level), level_name(level)));
            lines.extend(spells.iter().map(|spell| spell.replace('\n', " ")));
        }
    }

    /// Formatted sheet value, or a `{reference}` to the named resource.
    fn modifier(&self, value: &str, resource: impl FnOnce() -> String) -> String {
        if self.computed {
            format_modifier(value)
        } else {
            format!("{{{}}}", resource())
        }
    }
}

/// `{damage} [{type}] {name}のダメージ ({note})`; the separating spaces stay
/// when the bracketed parts are empty.
fn damage_line(attack: &Attack) -> String {
    let damage_type = if attack.damage_type.is_empty() {
        String::new()
    } else {
        format!("[{}]", attack.damage_type)
    };
    let note = if attack.note.is_empty() {
        String::new()
    } else {
        format!("({})", attack.note)
    };

    format!(
        "{} {} {}のダメージ {}",
        attack.damage, damage_type, attack.name, note
    )
}

fn skill_line(check: &str, modifier: &str, skill: Skill) -> String {
    format!(
        "{}{} ▼{} 【{}】技能判定",
        check,
        modifier,
        skill.label(),
        skill.ability().abbreviation()
    )
}

/// Keycap emoji for the level digit (`1⃣`).
fn keycap(level: SpellLevel) -> String {
    format!("{}\u{20e3}", level.get())
}

fn level_name(level: SpellLevel) -> String {
    if level.is_cantrip() {
        "初級".to_string()
    } else {
        level.to_string()
    }
}
