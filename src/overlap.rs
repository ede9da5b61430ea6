use crate::models::{Appointment, LayoutDescriptor, OverlapGroup, PlacedAppointment};

/// Half-open overlap test on the appointments' absolute intervals.
///
/// Touching slots (`a.end == b.start`) do not overlap. A slot that does not
/// end after it starts only collides with appointments starting at the same
/// instant.
pub fn intervals_overlap(a: &Appointment, b: &Appointment) -> bool {
    if a.is_degenerate() || b.is_degenerate() {
        return a.starts_at() == b.starts_at();
    }
    a.starts_at() < b.ends_at() && b.starts_at() < a.ends_at()
}

/// Splits appointments into side-by-side overlap groups.
///
/// Single greedy pass in input order: each appointment joins the first group
/// holding any member it overlaps, else it opens a new group. Chained overlaps
/// are therefore order dependent; two groups are never merged after the fact.
pub fn group_overlaps(appointments: &[Appointment]) -> Vec<OverlapGroup> {
    let mut groups: Vec<Vec<&Appointment>> = Vec::new();

    for appointment in appointments {
        let existing = groups.iter_mut().find(|group| {
            group
                .iter()
                .any(|member| intervals_overlap(member, appointment))
        });

        match existing {
            Some(group) => group.push(appointment),
            None => groups.push(vec![appointment]),
        }
    }

    groups
        .into_iter()
        .map(|members| {
            let total = members.len();
            OverlapGroup {
                members: members
                    .into_iter()
                    .enumerate()
                    .map(|(index, appointment)| PlacedAppointment {
                        appointment: appointment.clone(),
                        layout: LayoutDescriptor { index, total },
                    })
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use proptest::prelude::*;
    use serde_json::Map;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn appointment(id: &str, start: NaiveTime, end: NaiveTime) -> Appointment {
        Appointment {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            start,
            end,
            payload: Map::new(),
        }
    }

    fn layouts(groups: &[OverlapGroup]) -> Vec<Vec<(usize, usize)>> {
        groups
            .iter()
            .map(|group| {
                group
                    .members
                    .iter()
                    .map(|placed| (placed.layout.index, placed.layout.total))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn empty_input_has_no_groups() {
        assert!(group_overlaps(&[]).is_empty());
    }

    #[test]
    fn single_appointment_is_a_singleton() {
        let groups = group_overlaps(&[appointment("a", at(9, 0), at(10, 0))]);
        assert_eq!(layouts(&groups), vec![vec![(0, 1)]]);
    }

    #[test]
    fn partially_overlapping_pair_shares_a_group() {
        let groups = group_overlaps(&[
            appointment("a", at(9, 0), at(10, 0)),
            appointment("b", at(9, 30), at(10, 30)),
        ]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].ids(), vec!["a", "b"]);
        assert_eq!(layouts(&groups), vec![vec![(0, 2), (1, 2)]]);
    }

    #[test]
    fn touching_slots_do_not_overlap() {
        let a = appointment("a", at(9, 0), at(10, 0));
        let b = appointment("b", at(10, 0), at(11, 0));
        assert!(!intervals_overlap(&a, &b));
        assert!(!intervals_overlap(&b, &a));
        assert_eq!(
            layouts(&group_overlaps(&[a, b])),
            vec![vec![(0, 1)], vec![(0, 1)]]
        );
    }

    #[test]
    fn chain_through_middle_member_joins_one_group() {
        let groups = group_overlaps(&[
            appointment("a", at(9, 0), at(10, 0)),
            appointment("b", at(9, 30), at(10, 30)),
            appointment("c", at(10, 15), at(11, 0)),
        ]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 3);
        assert_eq!(layouts(&groups), vec![vec![(0, 3), (1, 3), (2, 3)]]);
    }

    #[test]
    fn late_bridge_does_not_merge_existing_groups() {
        // b bridges a and c, but c already opened its own group.
        let groups = group_overlaps(&[
            appointment("a", at(9, 0), at(10, 0)),
            appointment("c", at(10, 30), at(11, 30)),
            appointment("b", at(9, 30), at(10, 45)),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].ids(), vec!["a", "b"]);
        assert_eq!(groups[1].ids(), vec!["c"]);
    }

    #[test]
    fn disjoint_appointments_are_all_singletons() {
        let groups = group_overlaps(&[
            appointment("a", at(8, 0), at(8, 30)),
            appointment("b", at(9, 0), at(9, 30)),
            appointment("c", at(10, 0), at(10, 30)),
        ]);
        assert_eq!(groups.len(), 3);
        assert!(groups.iter().all(|group| group.len() == 1));
    }

    #[test]
    fn degenerate_slot_only_meets_coincident_starts() {
        let reversed = appointment("reversed", at(9, 30), at(9, 0));
        let covering = appointment("covering", at(9, 0), at(10, 0));
        let same_start = appointment("same-start", at(9, 30), at(9, 45));

        assert!(!intervals_overlap(&reversed, &covering));
        assert!(intervals_overlap(&reversed, &same_start));

        let groups = group_overlaps(&[covering.clone(), reversed.clone()]);
        assert_eq!(groups.len(), 2);

        let groups = group_overlaps(&[reversed, same_start]);
        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn different_days_never_overlap() {
        let mut other_day = appointment("b", at(9, 0), at(10, 0));
        other_day.date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let groups = group_overlaps(&[appointment("a", at(9, 0), at(10, 0)), other_day]);
        assert_eq!(groups.len(), 2);
    }

    fn arb_appointments() -> impl Strategy<Value = Vec<Appointment>> {
        prop::collection::vec((8u32..18, 0u32..60, 0u32..180), 0..12).prop_map(|slots| {
            slots
                .into_iter()
                .enumerate()
                .map(|(i, (hour, minute, length))| {
                    let start = at(hour, minute);
                    let end = start + chrono::Duration::minutes(length as i64);
                    appointment(&format!("apt-{i}"), start, end)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn every_appointment_lands_in_exactly_one_group(appointments in arb_appointments()) {
            let groups = group_overlaps(&appointments);
            let mut placed: Vec<&str> = groups.iter().flat_map(|g| g.ids()).collect();
            placed.sort_unstable();
            let mut expected: Vec<&str> = appointments.iter().map(|a| a.id.as_str()).collect();
            expected.sort_unstable();
            prop_assert_eq!(placed, expected);
        }

        #[test]
        fn larger_groups_contain_an_overlapping_pair(appointments in arb_appointments()) {
            for group in group_overlaps(&appointments).iter().filter(|g| g.len() > 1) {
                let members: Vec<&Appointment> =
                    group.members.iter().map(|p| &p.appointment).collect();
                let has_pair = members.iter().enumerate().any(|(i, a)| {
                    members[i + 1..].iter().any(|b| intervals_overlap(a, b))
                });
                prop_assert!(has_pair);
            }
        }

        #[test]
        fn descriptors_match_group_positions(appointments in arb_appointments()) {
            for group in group_overlaps(&appointments) {
                for (position, placed) in group.members.iter().enumerate() {
                    prop_assert_eq!(placed.layout.index, position);
                    prop_assert_eq!(placed.layout.total, group.len());
                }
            }
        }

        #[test]
        fn grouping_is_repeatable(appointments in arb_appointments()) {
            prop_assert_eq!(group_overlaps(&appointments), group_overlaps(&appointments));
        }
    }
}
