//! Unit tests for anvil-order modules

mod common;

mod enchantment_test {
    use crate::common::ench;
    use anvil_order::types::{parse_roman_numeral, roman_numeral};

    #[test]
    fn test_experience_is_level_times_weight() {
        assert_eq!(ench("Looting", 3, 2).experience(), 6);
        assert_eq!(ench("Sharpness", 5, 1).experience(), 5);
    }

    #[test]
    fn test_total_order_experience_then_level_then_name() {
        // Equal experience: the lower level sorts first.
        let heavy = ench("Flame", 1, 2);
        let tall = ench("Knockback", 2, 1);
        assert!(heavy < tall);

        // Equal experience and level: name decides.
        let a = ench("Aqua Affinity", 1, 2);
        let b = ench("Flame", 1, 2);
        assert!(a < b);

        // Experience dominates everything else.
        assert!(ench("Knockback", 2, 1) < ench("Mending", 1, 4));
    }

    #[test]
    fn test_display_uses_roman_level() {
        assert_eq!(ench("Sharpness", 5, 1).to_string(), "Sharpness V");
        assert_eq!(ench("Looting", 3, 2).to_string(), "Looting III");
    }

    #[test]
    fn test_roman_numeral_formatting() {
        assert_eq!(roman_numeral(1), "I");
        assert_eq!(roman_numeral(4), "IV");
        assert_eq!(roman_numeral(9), "IX");
        assert_eq!(roman_numeral(40), "XL");
        assert_eq!(roman_numeral(3999), "MMMCMXCIX");
        // Out of range falls back to decimal.
        assert_eq!(roman_numeral(0), "0");
        assert_eq!(roman_numeral(4000), "4000");
    }

    #[test]
    fn test_roman_numeral_parsing() {
        assert_eq!(parse_roman_numeral("V"), Some(5));
        assert_eq!(parse_roman_numeral("iii"), Some(3));
        assert_eq!(parse_roman_numeral("XIV"), Some(14));
        assert_eq!(parse_roman_numeral("IIII"), None);
        assert_eq!(parse_roman_numeral("VX"), None);
        assert_eq!(parse_roman_numeral(""), None);
        assert_eq!(parse_roman_numeral("abc"), None);
    }
}

mod schedule_test {
    use crate::common::ench;
    use anvil_order::error::Error;
    use anvil_order::order::{ScheduleOptions, schedule, schedule_with};

    #[test]
    fn test_empty_wanted_list_is_an_input_error() {
        match schedule(&[], 0) {
            Err(Error::EmptyWantedList) => {}
            other => panic!("expected EmptyWantedList, got: {other:?}"),
        }
    }

    #[test]
    fn test_conflicting_duplicate_names_are_rejected() {
        let wanted = vec![ench("Sharpness", 5, 1), ench("Sharpness", 4, 1)];
        match schedule(&wanted, 0) {
            Err(Error::DuplicateEnchantment(name)) => assert_eq!(name, "Sharpness"),
            other => panic!("expected DuplicateEnchantment, got: {other:?}"),
        }
    }

    #[test]
    fn test_exact_duplicates_collapse_to_one() {
        let wanted = vec![ench("Sharpness", 5, 1), ench("Sharpness", 5, 1)];
        let plan = schedule(&wanted, 0).unwrap();
        assert_eq!(plan.steps().len(), 1);
        assert_eq!(plan.action_count(), 1);
        assert_eq!(plan.total_experience(), 5);
    }

    #[test]
    fn test_single_enchantment_plan() {
        let plan = schedule(&[ench("Sharpness", 5, 1)], 0).unwrap();
        assert_eq!(plan.steps().len(), 1);
        assert_eq!(plan.penalty(), 1);
        assert_eq!(plan.max_experience(), 5);
        assert_eq!(plan.total_experience(), 5);
        assert!(!plan.is_too_expensive());
        assert!(!plan.is_too_many_penalty());
    }

    #[test]
    fn test_two_trivial_enchantments_are_feasible() {
        let plan = schedule(&[ench("A", 1, 1), ench("B", 1, 1)], 0).unwrap();
        assert!(plan.max_experience() <= 39);
        assert_eq!(plan.penalty(), 2);
        // Cheapest order applies them one at a time: 1 + 1*2.
        assert_eq!(plan.total_experience(), 3);
    }

    #[test]
    fn test_two_enchantments_heavier_goes_first() {
        let plan = schedule(&[ench("Sharpness", 5, 1), ench("Looting", 3, 2)], 0).unwrap();
        // Looting (exp 6) while the item is fresh, Sharpness (exp 5) at 2x.
        assert_eq!(plan.total_experience(), 16);
        assert_eq!(plan.max_experience(), 10);
        assert_eq!(plan.steps()[0].enchantments[0].name, "Looting");
        assert_eq!(plan.steps()[1].enchantments[0].name, "Sharpness");
    }

    #[test]
    fn test_three_equal_ties_break_toward_fewer_steps() {
        let wanted = vec![ench("A", 1, 1), ench("B", 1, 1), ench("C", 1, 1)];
        let plan = schedule(&wanted, 0).unwrap();
        // Pre-merging a pair and applying it first costs 7, the same as
        // pure sequential application; the tie goes to fewer item ops.
        assert_eq!(plan.total_experience(), 7);
        assert_eq!(plan.steps().len(), 2);
        assert_eq!(plan.penalty(), 2);
        assert_eq!(plan.action_count(), 3);
    }

    #[test]
    fn test_four_equal_pre_merge_beats_sequential() {
        let wanted = vec![
            ench("A", 1, 1),
            ench("B", 1, 1),
            ench("C", 1, 1),
            ench("D", 1, 1),
        ];
        let plan = schedule(&wanted, 0).unwrap();
        // One pair applied first, then the two leaves: 1 + 4 + 2 + 4.
        assert_eq!(plan.total_experience(), 11);
        assert_eq!(plan.penalty(), 3);
        assert_eq!(plan.max_experience(), 4);
        assert_eq!(plan.steps().len(), 3);
        assert_eq!(plan.action_count(), 4);
        assert_eq!(plan.steps()[0].count, 2);
    }

    #[test]
    fn test_deterministic_across_repeated_calls() {
        let wanted = vec![
            ench("Sharpness", 5, 1),
            ench("Looting", 3, 2),
            ench("Unbreaking", 3, 1),
            ench("Mending", 1, 2),
            ench("Fire Aspect", 2, 2),
        ];
        let first = schedule(&wanted, 0).unwrap();
        let second = schedule(&wanted, 0).unwrap();
        assert_eq!(first.action_count(), second.action_count());
        assert_eq!(first.total_experience(), second.total_experience());
        assert_eq!(first.steps(), second.steps());
    }

    #[test]
    fn test_initial_penalty_monotonicity() {
        let wanted = vec![ench("A", 1, 1), ench("B", 1, 1), ench("C", 1, 1)];
        let mut last_total = 0;
        let mut last_penalty = 0;
        for initial in 0..4 {
            let plan = schedule(&wanted, initial).unwrap();
            assert!(plan.total_experience() >= last_total);
            assert!(plan.penalty() >= last_penalty);
            last_total = plan.total_experience();
            last_penalty = plan.penalty();
        }
    }

    #[test]
    fn test_penalty_cap_is_a_hard_error() {
        // With six prior works even a single combine lands on penalty 7.
        match schedule(&[ench("Sharpness", 5, 1)], 6) {
            Err(Error::TooManyPenalty { penalty }) => assert_eq!(penalty, 7),
            other => panic!("expected TooManyPenalty, got: {other:?}"),
        }
    }

    #[test]
    fn test_experience_cap_is_a_hard_error() {
        match schedule(&[ench("Oversized", 10, 4)], 0) {
            Err(Error::TooExpensive { max_experience }) => assert_eq!(max_experience, 40),
            other => panic!("expected TooExpensive, got: {other:?}"),
        }
    }

    #[test]
    fn test_strict_mode_never_returns_a_flagged_plan() {
        let wanted = vec![
            ench("Sharpness", 5, 1),
            ench("Looting", 3, 2),
            ench("Unbreaking", 3, 1),
            ench("Mending", 1, 2),
        ];
        let plan = schedule(&wanted, 1).unwrap();
        assert!(!plan.is_too_expensive());
        assert!(!plan.is_too_many_penalty());
        assert!(plan.penalty() <= 6);
        assert!(plan.max_experience() <= 39);
    }

    #[test]
    fn test_tolerant_mode_returns_flagged_plan() {
        let options = ScheduleOptions {
            initial_penalty: 6,
            tolerate_caps: true,
        };
        let plan = schedule_with(&[ench("Sharpness", 5, 1)], &options).unwrap();
        assert_eq!(plan.penalty(), 7);
        assert!(plan.is_too_many_penalty());
        // 5 * 2^6
        assert_eq!(plan.total_experience(), 320);
        assert!(plan.is_too_expensive());
    }

    #[test]
    fn test_greedy_fallback_stays_feasible() {
        // Nine trivial enchantments exceed the exhaustive-search cutoff.
        let wanted: Vec<_> = (0..9)
            .map(|index| ench(&format!("E{index}"), 1, 1))
            .collect();
        let first = schedule(&wanted, 0).unwrap();
        let second = schedule(&wanted, 0).unwrap();
        assert!(first.penalty() <= 6);
        assert!(first.max_experience() <= 39);
        assert_eq!(first.action_count(), 9);
        assert_eq!(first.steps(), second.steps());
    }
}

mod plan_test {
    use crate::common::ench;
    use anvil_order::order::schedule;
    use std::cmp::Ordering;

    #[test]
    fn test_comparator_prefers_lower_penalty_then_total() {
        let one = schedule(&[ench("A", 1, 1)], 0).unwrap();
        let pricier = schedule(&[ench("B", 5, 1)], 0).unwrap();
        let two = schedule(&[ench("A", 1, 1), ench("B", 1, 1)], 0).unwrap();

        // Same penalty, cheaper total wins.
        assert!(one < pricier);
        // Lower penalty wins outright.
        assert!(pricier < two);
        assert!(one < two);
    }

    #[test]
    fn test_comparator_is_a_total_order() {
        let plans = vec![
            schedule(&[ench("A", 1, 1)], 0).unwrap(),
            schedule(&[ench("B", 5, 1)], 0).unwrap(),
            schedule(&[ench("A", 1, 1), ench("B", 1, 1)], 0).unwrap(),
            schedule(&[ench("A", 1, 1)], 2).unwrap(),
        ];
        for a in &plans {
            for b in &plans {
                // Exactly one of <, =, > holds.
                let relations = [a < b, a == b, a > b];
                assert_eq!(relations.iter().filter(|held| **held).count(), 1);
                for c in &plans {
                    if a <= b && b <= c {
                        assert!(a <= c);
                    }
                }
            }
        }
    }

    #[test]
    fn test_plans_with_identical_metrics_compare_equal() {
        let a = schedule(&[ench("A", 1, 1)], 0).unwrap();
        let b = schedule(&[ench("Z", 1, 1)], 0).unwrap();
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn test_rendering_is_derivable_from_plan_fields() {
        let plan = schedule(&[ench("Sharpness", 5, 1)], 0).unwrap();
        let rendered = plan.to_string();
        assert_eq!(
            rendered,
            "Step 1: Sharpness V\n\
             Penalty Level: 1\n\
             Max Experience Level: 5\n\
             Total Experience Level: 5"
        );
    }

    #[test]
    fn test_step_lines_join_groups_with_plus() {
        let wanted = vec![
            ench("A", 1, 1),
            ench("B", 1, 1),
            ench("C", 1, 1),
            ench("D", 1, 1),
        ];
        let plan = schedule(&wanted, 0).unwrap();
        let rendered = plan.to_string();
        assert!(rendered.contains(" + "));
        assert!(rendered.lines().count() == plan.steps().len() + 3);
    }
}

mod catalog_test {
    use crate::common::{InMemoryCatalog, entry};
    use anvil_order::catalog::{Catalog, JsonCatalog, candidate_sets};
    use anvil_order::error::Error;

    const CATALOG_JSON: &str = r#"{
        "Sharpness": { "level_max": 5, "weight": 1, "items": ["sword", "axe"], "incompatible": ["Smite"] },
        "Smite": { "level_max": 5, "weight": 1, "items": ["sword", "axe"], "incompatible": ["Sharpness"] },
        "Looting": { "level_max": 3, "weight": 2, "items": ["sword"] },
        "Curse of Vanishing": { "level_max": 1, "weight": 4, "items": ["sword"], "hidden": true }
    }"#;

    #[test]
    fn test_find_is_case_insensitive() {
        let catalog = JsonCatalog::from_json(CATALOG_JSON).unwrap();
        assert!(catalog.find("sharpness").is_some());
        assert!(catalog.find("SHARPNESS").is_some());
        assert!(catalog.find("Sharpness II").is_none());
    }

    #[test]
    fn test_entry_resolves_to_enchantment_values() {
        let catalog = JsonCatalog::from_json(CATALOG_JSON).unwrap();
        let looting = catalog.find("Looting").unwrap();
        assert_eq!(looting.enchantment().experience(), 6);
        assert_eq!(looting.enchantment_at(1).experience(), 2);
    }

    #[test]
    fn test_for_item_filters_kind_and_hidden() {
        let catalog = JsonCatalog::from_json(CATALOG_JSON).unwrap();
        let sword = catalog.for_item("sword");
        let names: Vec<&str> = sword.iter().map(|entry| entry.name.as_str()).collect();
        assert!(names.contains(&"Sharpness"));
        assert!(names.contains(&"Looting"));
        assert!(!names.contains(&"Curse of Vanishing"));

        let axe = catalog.for_item("axe");
        assert_eq!(axe.len(), 2);
    }

    #[test]
    fn test_items_are_sorted_and_deduplicated() {
        let catalog = JsonCatalog::from_json(CATALOG_JSON).unwrap();
        assert_eq!(catalog.items(), vec!["axe", "sword"]);
    }

    #[test]
    fn test_malformed_catalog_is_a_catalog_error() {
        match JsonCatalog::from_json("{ not json") {
            Err(Error::Catalog(message)) => assert!(message.contains("malformed")),
            other => panic!("expected Catalog error, got: {other:?}"),
        }
    }

    #[test]
    fn test_zero_level_or_weight_is_rejected() {
        let json = r#"{ "Broken": { "level_max": 0, "weight": 1 } }"#;
        assert!(matches!(
            JsonCatalog::from_json(json),
            Err(Error::Catalog(_))
        ));
    }

    #[test]
    fn test_candidate_sets_without_conflicts_is_one_set() {
        let a = entry("Looting", 3, 2, &[]);
        let b = entry("Unbreaking", 3, 1, &[]);
        let sets = candidate_sets(&[&a, &b]);
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].len(), 2);
    }

    #[test]
    fn test_candidate_sets_split_around_conflicts() {
        let sharpness = entry("Sharpness", 5, 1, &["Smite"]);
        let smite = entry("Smite", 5, 1, &["Sharpness"]);
        let looting = entry("Looting", 3, 2, &[]);
        let sets = candidate_sets(&[&sharpness, &smite, &looting]);

        // One set per conflicted entry, each carrying the shared base.
        assert_eq!(sets.len(), 2);
        for set in &sets {
            assert_eq!(set.len(), 2);
            assert!(set.iter().any(|enchantment| enchantment.name == "Looting"));
        }
        assert!(sets[0].iter().any(|e| e.name == "Sharpness"));
        assert!(sets[1].iter().any(|e| e.name == "Smite"));
    }

    #[test]
    fn test_conflict_detection_is_symmetric() {
        // Only one side declares the conflict.
        let silk = entry("Silk Touch", 1, 4, &["Fortune"]);
        let fortune = entry("Fortune", 3, 2, &[]);
        assert!(silk.conflicts_with(&fortune));
        assert!(fortune.conflicts_with(&silk));
    }

    #[test]
    fn test_trait_defaults_work_for_any_implementation() {
        let catalog = InMemoryCatalog::new(vec![
            entry("Sharpness", 5, 1, &["Smite"]),
            entry("Smite", 5, 1, &["Sharpness"]),
        ]);
        assert_eq!(catalog.for_item("sword").len(), 2);
        assert_eq!(catalog.items(), vec!["sword"]);
    }
}

mod i18n_test {
    use anvil_order::i18n::{current_locale, is_available, set_locale, t, t_with_args};
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_default_resolves_to_english() {
        set_locale("default");
        assert_eq!(current_locale(), "en");
        assert_eq!(t("order.start"), "Start ordering...");
    }

    #[test]
    #[serial]
    fn test_locale_switch_changes_messages() {
        set_locale("zh-CN");
        assert_eq!(current_locale(), "zh-CN");
        assert_eq!(t("order.start"), "开始排序...");
        set_locale("default");
    }

    #[test]
    #[serial]
    fn test_placeholder_substitution() {
        set_locale("en");
        let message = t_with_args("order.added", &[("name", "Sharpness")]);
        assert_eq!(message, "Added Sharpness.");
    }

    #[test]
    fn test_availability() {
        assert!(is_available("default"));
        assert!(is_available("zh-cn"));
        assert!(!is_available("fr"));
    }
}
