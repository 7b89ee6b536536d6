//! Start/end splicing
//!
//!     The route service always emits a synthetic "Start of route" and "End of route" cue.
//!     Riders who begin or finish somewhere else tag an entry with `[start]` or `[end]`;
//!     splicing moves the tagged entry onto the boundary, discarding the synthetic cue it
//!     replaces, and relinks every `for_distance` afterwards.
//!
//!     Only the first tag of each kind counts. An `[end]` tag on the very first entry of a
//!     multi-entry route is left alone, since moving it would leave the route without a
//!     zero-mile start.

use super::model::{relink_distances, Entry, Route};
use super::vocabulary::Instruction;

const START_TAG: &str = "start";
const END_TAG: &str = "end";

/// Rebuild `entries` with any tagged start/end entries moved to the boundaries.
///
/// Returns the input unchanged when no tag is present. Otherwise the result has its
/// distances relinked and is shorter by the number of tags that had to move.
pub fn splice(entries: Vec<Entry>) -> Vec<Entry> {
    let Some(last_index) = entries.len().checked_sub(1) else {
        return entries;
    };
    let start = find_tag(&entries, START_TAG, 0);
    let end = find_tag(&entries, END_TAG, usize::from(last_index > 0));
    if start.is_none() && end.is_none() {
        return entries;
    }

    let final_distance = entries[last_index].absolute_distance;
    let drop_first = start.is_some() && start != Some(0);
    let drop_last = end.is_some() && end != Some(last_index) && start != Some(last_index);

    let mut head = None;
    let mut tail = None;
    let mut body = Vec::with_capacity(entries.len());
    for (index, mut entry) in entries.into_iter().enumerate() {
        if Some(index) == start {
            entry.instruction = Instruction::RouteStart;
            entry.absolute_distance = 0.0;
            head = Some(entry);
        } else if Some(index) == end {
            entry.instruction = Instruction::RouteEnd;
            entry.absolute_distance = final_distance;
            tail = Some(entry);
        } else if (index == 0 && drop_first) || (index == last_index && drop_last) {
            log::debug!("Dropping synthetic boundary entry {index}: {entry}");
        } else {
            body.push(entry);
        }
    }

    let mut spliced: Vec<Entry> = head.into_iter().chain(body).chain(tail).collect();
    relink_distances(&mut spliced);
    spliced
}

/// Splice the route's entries in place.
pub fn adjust(route: &mut Route) {
    let before = route.entries.len();
    route.entries = splice(std::mem::take(&mut route.entries));
    let removed = before - route.entries.len();
    if removed > 0 {
        log::info!(
            "Route {}: spliced {removed} start/end tag(s), {} entries remain",
            route.id,
            route.entries.len()
        );
    }
}

fn find_tag(entries: &[Entry], tag: &str, from: usize) -> Option<usize> {
    entries
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, entry)| {
            entry
                .custom_instruction()
                .is_some_and(|text| text.eq_ignore_ascii_case(tag))
        })
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_entries() -> Vec<Entry> {
        let mut entries = vec![
            Entry::new(Instruction::Right, "Start of route", 0.0),
            Entry::new(Instruction::Right, "Entry 1", 1.0),
            Entry::new(Instruction::Right, "Entry 2", 1.5),
            Entry::new(Instruction::Right, "Entry 3", 4.0),
            Entry::new(Instruction::Right, "Entry 4", 5.0),
            Entry::new(Instruction::Right, "End of route", 8.0),
        ];
        relink_distances(&mut entries);
        entries
    }

    fn make_route() -> Route {
        Route::new("12345", make_entries(), 8.0)
            .with_name("Test Route")
            .with_elevation_gain(1000.0)
    }

    fn tag(entries: &mut [Entry], index: usize, text: &str) {
        entries[index].description = "Foo".into();
        entries[index].instruction = Instruction::Custom(text.into());
    }

    #[test]
    fn test_start_only() {
        let mut route = make_route();
        tag(&mut route.entries, 3, "Start");

        adjust(&mut route);
        assert_eq!(route.entries.len(), 5);
        let first = &route.entries[0];
        assert_eq!(first.description, "Foo");
        assert_eq!(first.absolute_distance, 0.0);
        assert_eq!(first.for_distance, Some(route.entries[1].absolute_distance));
        assert_eq!(first.instruction, Instruction::RouteStart);
        assert_eq!(route.validate(), Ok(()));
    }

    #[test]
    fn test_end_only() {
        let mut route = make_route();
        tag(&mut route.entries, 3, "End");

        adjust(&mut route);
        assert_eq!(route.entries.len(), 5);
        let last = route.entries.last().unwrap();
        assert_eq!(last.description, "Foo");
        assert_eq!(last.absolute_distance, 8.0);
        assert_eq!(last.for_distance, None);
        assert_eq!(last.instruction, Instruction::RouteEnd);
        assert_eq!(route.entries[3].description, "Entry 4");
        assert_eq!(route.entries[3].for_distance, Some(3.0));
        assert_eq!(route.validate(), Ok(()));
    }

    #[test]
    fn test_start_and_end() {
        let mut entries = make_entries();
        tag(&mut entries, 2, "START");
        tag(&mut entries, 3, "end");

        let spliced = splice(entries);
        let descriptions: Vec<&str> = spliced.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(descriptions, vec!["Foo", "Entry 1", "Entry 4", "Foo"]);
        assert_eq!(spliced[0].instruction, Instruction::RouteStart);
        assert_eq!(spliced[3].instruction, Instruction::RouteEnd);
        let fors: Vec<Option<f64>> = spliced.iter().map(|e| e.for_distance).collect();
        assert_eq!(fors, vec![Some(1.0), Some(4.0), Some(3.0), None]);
    }

    #[test]
    fn test_no_tags_is_untouched() {
        let entries = make_entries();
        assert_eq!(splice(entries.clone()), entries);
    }

    #[test]
    fn test_other_custom_text_ignored() {
        let mut entries = make_entries();
        tag(&mut entries, 2, "Started");
        assert_eq!(splice(entries.clone()), entries);
    }

    #[test]
    fn test_only_first_tag_counts() {
        let mut entries = make_entries();
        tag(&mut entries, 1, "start");
        tag(&mut entries, 3, "start");

        let spliced = splice(entries);
        assert_eq!(spliced.len(), 5);
        assert_eq!(spliced[0].absolute_distance, 0.0);
        assert_eq!(spliced[0].instruction, Instruction::RouteStart);
        assert_eq!(spliced[2].instruction, Instruction::Custom("start".into()));
    }

    #[test]
    fn test_tag_on_boundary_converted_in_place() {
        let mut entries = make_entries();
        tag(&mut entries, 0, "start");
        tag(&mut entries, 5, "end");

        let spliced = splice(entries);
        assert_eq!(spliced.len(), 6);
        assert_eq!(spliced[0].instruction, Instruction::RouteStart);
        assert_eq!(spliced[5].instruction, Instruction::RouteEnd);
        assert_eq!(spliced[5].absolute_distance, 8.0);
    }

    #[test]
    fn test_end_tag_on_first_entry_ignored() {
        let mut entries = make_entries();
        tag(&mut entries, 0, "end");
        assert_eq!(splice(entries.clone()), entries);
    }

    #[test]
    fn test_empty() {
        assert_eq!(splice(vec![]), vec![]);
    }
}
