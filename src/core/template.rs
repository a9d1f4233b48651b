//! Battle NPC script template.
//!
//! Renders a `BattleNpcScript` C++ source file from a selected entity and its
//! gambit entries. Output is a pure function of the inputs.

use super::catalog::{EntityRecord, ACTION_SENTINEL, ENTITY_SENTINEL};
use super::gambits::GambitEntry;

/// Prefix joined to the entity name to form the script class name.
pub const CLASS_PREFIX: &str = "Bnpc";

/// Shown in place of the script while no real BNPC is selected.
pub const PREVIEW_PLACEHOLDER: &str = "// Please select a BNPC...";

const SCRIPT_SKELETON: &str = r#"// File: src/scripts/battlenpc/{class}.cpp

#include <AI/GambitPack.h>
#include <AI/GambitTargetCondition.h>
#include <Action/Action.h>
#include <Actor/BNpc.h>
#include <Logging/Logger.h>
#include <ScriptObject.h>

using namespace Sapphire::World;
using namespace Sapphire::ScriptAPI;
using namespace Sapphire::World::AI;
using namespace Sapphire::Entity;

class {class} : public BattleNpcScript
{
public:
    {class}() : BattleNpcScript( {base_id} ) {}

    void onInit( Sapphire::Entity::BNpc& bnpc ) override
    {
        bnpc.setBNpcNameId( {name_id} );
        auto gambitPack = std::make_shared< Sapphire::World::AI::GambitTimeLinePack >( -1 );

{blocks}        m_gambitPack = gambitPack;
        bnpc.setGambitPack( m_gambitPack );
    }

private:
    std::shared_ptr< Sapphire::World::AI::GambitPack > m_gambitPack;
};

EXPOSE_SCRIPT( {class} );"#;

const TIMELINE_BLOCK: &str = r#"        gambitPack->addTimeLine(
                Sapphire::World::AI::make_TopHateTargetCondition(),
                Sapphire::World::Action::make_Action( bnpc.getAsChara(), {action}, 0 ),
                {tick} );

"#;

/// Knobs for script rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemplateOptions {
    /// Timeline ticks between consecutive gambits. 0 puts every gambit on tick 0.
    pub timeline_step: u32,
}

/// Reduce a display name to characters valid in a C++ identifier.
pub fn sanitize_identifier(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if cleaned.is_empty() {
        "Default".to_string()
    } else {
        cleaned
    }
}

/// Script class name for an entity, e.g. `BnpcGoblin`.
pub fn class_name(entity: &EntityRecord) -> String {
    format!("{CLASS_PREFIX}{}", sanitize_identifier(&entity.name))
}

/// Action identifier as it appears in the script. Anything that is not an
/// unsigned integer becomes the action sentinel.
fn action_literal(action_id: &str) -> u32 {
    match action_id.trim().parse::<u32>() {
        Ok(id) => id,
        Err(_) => {
            log::warn!("Action id {action_id:?} is not numeric, emitting {ACTION_SENTINEL}");
            ACTION_SENTINEL
        }
    }
}

/// Render the script with default options.
pub fn generate(entity: &EntityRecord, entries: &[GambitEntry]) -> String {
    generate_with(entity, entries, &TemplateOptions::default())
}

/// Render the script for `entity` with one timeline block per entry, in order.
pub fn generate_with(
    entity: &EntityRecord,
    entries: &[GambitEntry],
    options: &TemplateOptions,
) -> String {
    let class = class_name(entity);

    let blocks: String = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let tick = (i as u64) * u64::from(options.timeline_step);
            TIMELINE_BLOCK
                .replace("{action}", &action_literal(&entry.action_id).to_string())
                .replace("{tick}", &tick.to_string())
        })
        .collect();

    SCRIPT_SKELETON
        .replace("{class}", &class)
        .replace("{base_id}", &entity.basenameid.to_string())
        .replace("{name_id}", &entity.nameid.to_string())
        .replace("{blocks}", &blocks)
}

/// Preview text for the current selection: the placeholder while the BNPC
/// field still holds the sentinel, the rendered script otherwise.
pub fn preview(
    selected_id: u32,
    resolve: impl FnOnce(u32) -> EntityRecord,
    entries: &[GambitEntry],
    options: &TemplateOptions,
) -> String {
    if selected_id == ENTITY_SENTINEL {
        return PREVIEW_PLACEHOLDER.to_string();
    }
    generate_with(&resolve(selected_id), entries, options)
}
