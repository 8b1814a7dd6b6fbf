//! Selection of which stops along a route receive a text label.

use mio_transit::{RouteStop, StopId};

/// Roughly this many interior stops are labeled per route
pub const INTERIOR_LABEL_TARGET: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelEmphasis {
    /// First or last stop, drawn bold
    Terminal,
    Interior,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LabelPlacement {
    pub index: usize,
    pub stop_id: StopId,
    pub emphasis: LabelEmphasis,
}

/// Pick the labeled stops of an ordered sequence.
///
/// Both terminals are always labeled (the last only when it differs from the
/// first). Interior stops are thinned to every `max(1, n / 6)`-th index, and
/// an interior index whose stop is also a terminal is left unlabeled.
pub fn plan_labels(stops: &[RouteStop]) -> Vec<LabelPlacement> {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Vec::new();
    };
    let n = stops.len();

    let mut placements = vec![LabelPlacement {
        index: 0,
        stop_id: first.stop_id,
        emphasis: LabelEmphasis::Terminal,
    }];

    if last.stop_id != first.stop_id {
        placements.push(LabelPlacement {
            index: n - 1,
            stop_id: last.stop_id,
            emphasis: LabelEmphasis::Terminal,
        });
    }

    let step = (n / INTERIOR_LABEL_TARGET).max(1);
    for index in (step..n - 1).step_by(step) {
        let stop_id = stops[index].stop_id;
        if stop_id != first.stop_id && stop_id != last.stop_id {
            placements.push(LabelPlacement {
                index,
                stop_id,
                emphasis: LabelEmphasis::Interior,
            });
        }
    }

    placements
}
