//! Stealth search: one d6 per hidden enemy in range.

use crate::board::units_within;
use crate::combat::{Reveal, RevealScope, apply_reveal};
use crate::engine::ActionContext;
use crate::env::RngOracle;
use crate::state::{GameEvent, RollKind, SearchContext, UnitId};

use super::Frame;

pub(super) fn resume(
    ctx: &mut ActionContext<'_>,
    frame: Frame,
    search: SearchContext,
    rng: &mut dyn RngOracle,
) {
    let Some(searcher) = ctx.state.living_unit(search.searcher).cloned() else {
        frame.cancel(ctx, RollKind::StealthSearch);
        return;
    };
    let Some(origin) = searcher.position else {
        frame.cancel(ctx, RollKind::StealthSearch);
        return;
    };

    let config = ctx.config();
    let candidates: Vec<UnitId> = units_within(&ctx.state, origin, config.search_radius)
        .into_iter()
        .filter(|id| {
            ctx.state.unit(*id).is_some_and(|unit| {
                unit.owner != searcher.owner && !ctx.state.is_visible_to(searcher.owner, unit)
            })
        })
        .collect();

    let mut found = Vec::new();
    for candidate in candidates {
        let face = rng.roll_d6();
        frame.dice(ctx, searcher.owner, searcher.id, &[face]);
        if face >= config.search_threshold {
            apply_reveal(
                ctx,
                Reveal {
                    unit: candidate,
                    scope: RevealScope::Opponent,
                },
            );
            found.push(candidate);
        }
    }

    ctx.emit(GameEvent::SearchResolved {
        searcher: searcher.id,
        found,
    });
}
