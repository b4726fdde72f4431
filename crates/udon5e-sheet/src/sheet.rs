//! The Udonarium character sheet document.

use udon5e_common::{format_modifier, Ability, CharacterRecord, SpellLevel};

use crate::node::XmlNode;
use crate::Result;

/// Dice bot the chat palette is written for.
pub const DICEBOT: &str = "DungeonsAndDragons5";

/// Build the sheet as an XML tree.
///
/// The chat palette is embedded verbatim next to the character data.
pub fn sheet_document(record: &CharacterRecord, chat_palette: &str) -> XmlNode {
    let character = data("character")
        .child(data("image").child(
            data("imageIdentifier").attr("type", "image").text("null"),
        ))
        .child(
            data("common")
                .child(data("name").text(&record.name))
                .child(data("size").text("1")),
        )
        .child(detail(record));

    XmlNode::new("character").child(character).child(
        XmlNode::new("chat-palette")
            .attr("dicebot", DICEBOT)
            .text(chat_palette),
    )
}

/// Build the sheet and serialize it.
pub fn build_xml(record: &CharacterRecord, chat_palette: &str) -> Result<String> {
    let xml = sheet_document(record, chat_palette).to_xml_string()?;
    tracing::debug!(name = %record.name, bytes = xml.len(), "built character XML");
    Ok(xml)
}

fn data(name: impl Into<String>) -> XmlNode {
    XmlNode::new("data").attr("name", name)
}

/// A trackable value whose current value starts at `current`.
fn resource(name: impl Into<String>, current: &str, max: &str) -> XmlNode {
    data(name)
        .attr("type", "numberResource")
        .attr("currentValue", current)
        .text(max)
}

fn note(name: &str, text: &str) -> XmlNode {
    data(name).attr("type", "note").text(text)
}

fn detail(record: &CharacterRecord) -> XmlNode {
    let basics = data("基本")
        .child(data("種族").text(&record.race))
        .child(data("クラス").text(&record.classes))
        .child(data("属性").text(&record.alignment))
        .child(data("プレイヤー").text(&record.player))
        .child(data("レベル").text(&record.level));

    let scores = data("能力値").children(
        record
            .abilities
            .iter()
            .map(|(ability, value)| data(format!("【{}】", ability.label())).text(value)),
    );

    let modifiers = data("能力値修正").children(record.ability_modifiers.iter().map(
        |(ability, value)| data(modifier_name(ability)).text(format_modifier(value)),
    ));

    let combat = data("行動データ")
        .child(data("AC").text(&record.armor_class))
        .child(resource("HP", &record.hit_points, &record.hit_points))
        .child(resource("一時的HP", "0", "100"))
        .child(data("ヒット・ダイス").text(&record.hit_dice))
        .child(resource("インスピレーション", "0", "1"))
        .child(data("習熟ボーナス").text(&record.proficiency_bonus))
        .child(data("呪文攻撃ロール").text(format_modifier(&record.spell_attack)))
        .child(data("呪文セーブ").text(&record.spell_save_dc))
        .child(data("サイズ").text(&record.size))
        .child(data("移動速度").text(&record.speed))
        .child(data("イニシアチブ").text(format_modifier(&record.initiative)))
        .child(data("状態異常").text("-"));

    let skills = data("技能").children(
        record
            .skills
            .iter()
            .map(|(skill, value)| data(skill.label()).text(format_modifier(value))),
    );

    let saves = data("セーヴィングスロー").children(
        record
            .saves
            .iter()
            .map(|(ability, value)| data(save_name(ability)).text(format_modifier(value))),
    );

    let notes = &record.notes;
    let features = data("特徴等")
        .child(note("背景", &notes.background))
        .child(note("人格的特徴", &notes.personality_traits))
        .child(note("尊ぶもの", &notes.ideals))
        .child(note("関わり深いもの", &notes.bonds))
        .child(note("弱味", &notes.flaws))
        .child(note("その他設定など", &notes.character_design))
        .child(note("その他の習熟と言語", &notes.proficiencies_and_languages))
        .child(note("特徴・特性", &notes.features_and_traits));

    data("detail")
        .child(basics)
        .child(scores)
        .child(modifiers)
        .child(combat)
        .child(skills)
        .child(saves)
        .child(features)
        .child(spells(record))
}

/// One group per level that has spells; empty levels are left out.
fn spells(record: &CharacterRecord) -> XmlNode {
    let book = &record.spellbook;

    data("呪文").children(book.known_levels().map(|(level, names)| {
        let group = match book.slots(level) {
            None => data(spell_group_name(level)),
            Some(slots) => data(spell_group_name(level)).child(resource(level.key(), slots, slots)),
        };
        group.children(names.iter().map(|name| data(name.as_str())))
    }))
}

/// Group label for a spell level: `初級呪文` or `lvN呪文`.
pub fn spell_group_name(level: SpellLevel) -> String {
    if level.is_cantrip() {
        "初級呪文".to_string()
    } else {
        format!("{}呪文", level)
    }
}

/// Name of the ability modifier resource (`筋力修正`, ...).
pub fn modifier_name(ability: Ability) -> String {
    format!("{}修正", ability.label())
}

/// Name of the saving throw resource (`筋力セーヴ`, ...).
pub fn save_name(ability: Ability) -> String {
    format!("{}セーヴ", ability.label())
}

#[cfg(test)]
mod tests {
    use super::*;
    use udon5e_common::{Abilities, Attack, Spellbook};

    fn find_data<'a>(root: &'a XmlNode, name: &str) -> Option<&'a XmlNode> {
        root.find(&|n| n.tag == "data" && n.attribute("name") == Some(name))
    }

    fn sample_record() -> CharacterRecord {
        let mut spellbook = Spellbook::new();
        let lv1 = SpellLevel::new(1).unwrap();
        spellbook.set_spells(SpellLevel::CANTRIP, vec!["ファイア・ボルト".to_string()]);
        spellbook.set_spells(lv1, vec!["シールド".to_string(), "スリープ".to_string()]);
        spellbook.set_slots(lv1, "4");
        spellbook.set_slots(SpellLevel::new(2).unwrap(), "2");

        CharacterRecord {
            name: "Test Hero".to_string(),
            race: "ハイ・エルフ".to_string(),
            hit_points: "18".to_string(),
            initiative: "2".to_string(),
            spell_attack: "5".to_string(),
            spell_save_dc: "13".to_string(),
            abilities: Abilities::from_fn(|_| "10".to_string()),
            ability_modifiers: Abilities::from_fn(|a| match a {
                Ability::Dex => "2".to_string(),
                Ability::Str => "-1".to_string(),
                _ => "0".to_string(),
            }),
            attacks: vec![Attack {
                name: "ダガー".to_string(),
                ..Attack::default()
            }],
            spellbook,
            ..CharacterRecord::default()
        }
    }

    #[test]
    fn test_document_skeleton() {
        let doc = sheet_document(&sample_record(), "palette");

        assert_eq!(doc.tag, "character");
        assert_eq!(doc.children.len(), 2);
        assert_eq!(doc.children[0].attribute("name"), Some("character"));

        let palette = &doc.children[1];
        assert_eq!(palette.tag, "chat-palette");
        assert_eq!(palette.attribute("dicebot"), Some("DungeonsAndDragons5"));
        assert_eq!(palette.text, "palette");

        let detail = find_data(&doc, "detail").unwrap();
        let groups: Vec<_> = detail
            .children
            .iter()
            .filter_map(|c| c.attribute("name"))
            .collect();
        assert_eq!(
            groups,
            ["基本", "能力値", "能力値修正", "行動データ", "技能", "セーヴィングスロー", "特徴等", "呪文"]
        );
    }

    #[test]
    fn test_formatted_values() {
        let doc = sheet_document(&sample_record(), "");

        assert_eq!(find_data(&doc, "敏捷力修正").unwrap().text, "+2");
        assert_eq!(find_data(&doc, "筋力修正").unwrap().text, "-1");
        assert_eq!(find_data(&doc, "魅力修正").unwrap().text, "+0");
        assert_eq!(find_data(&doc, "【筋力】").unwrap().text, "10");
        assert_eq!(find_data(&doc, "イニシアチブ").unwrap().text, "+2");
        assert_eq!(find_data(&doc, "呪文攻撃ロール").unwrap().text, "+5");
        assert_eq!(find_data(&doc, "呪文セーブ").unwrap().text, "13");
        // Blank skill cells pass through unformatted.
        assert_eq!(find_data(&doc, "〈歴史〉").unwrap().text, "");
    }

    #[test]
    fn test_resources() {
        let doc = sheet_document(&sample_record(), "");

        let hp = find_data(&doc, "HP").unwrap();
        assert_eq!(hp.attribute("type"), Some("numberResource"));
        assert_eq!(hp.attribute("currentValue"), Some("18"));
        assert_eq!(hp.text, "18");

        let temp = find_data(&doc, "一時的HP").unwrap();
        assert_eq!(temp.attribute("currentValue"), Some("0"));
        assert_eq!(temp.text, "100");

        let inspiration = find_data(&doc, "インスピレーション").unwrap();
        assert_eq!(inspiration.attribute("currentValue"), Some("0"));
        assert_eq!(inspiration.text, "1");
    }

    #[test]
    fn test_spell_groups_skip_empty_levels() {
        let doc = sheet_document(&sample_record(), "");
        let spells = find_data(&doc, "呪文").unwrap();

        let groups: Vec<_> = spells
            .children
            .iter()
            .filter_map(|c| c.attribute("name"))
            .collect();
        assert_eq!(groups, ["初級呪文", "lv1呪文"]);

        let cantrips = &spells.children[0];
        assert_eq!(cantrips.children.len(), 1);
        assert_eq!(cantrips.children[0].attribute("name"), Some("ファイア・ボルト"));

        let lv1 = &spells.children[1];
        assert_eq!(lv1.children.len(), 3);
        let slots = &lv1.children[0];
        assert_eq!(slots.attribute("name"), Some("lv1"));
        assert_eq!(slots.attribute("type"), Some("numberResource"));
        assert_eq!(slots.attribute("currentValue"), Some("4"));
        assert_eq!(slots.text, "4");
        assert_eq!(lv1.children[2].attribute("name"), Some("スリープ"));
        assert!(lv1.children[2].text.is_empty());
    }

    #[test]
    fn test_build_xml_text() {
        let mut record = sample_record();
        record.notes.background = "孤児\n<学者>".to_string();

        let xml = build_xml(&record, "1d20 攻撃").unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\"?>\n<character>"));
        assert!(xml.contains("<data name=\"name\">Test Hero</data>"));
        assert!(xml.contains("<data name=\"背景\" type=\"note\">孤児\n&lt;学者&gt;</data>"));
        assert!(xml.contains("<chat-palette dicebot=\"DungeonsAndDragons5\">1d20 攻撃</chat-palette>"));
        assert!(xml.contains("<data name=\"lv1\" type=\"numberResource\" currentValue=\"4\">4</data>"));
        assert!(xml.contains("<data name=\"シールド\"/>"));
    }
}
