use crate::domain::model::{Nanny, SortOption, POPULAR_RATING, PRICE_THRESHOLD};
use feruca::Collator;
use std::cmp::Ordering;

/// Derives the list shown for `option`. The input is never modified; the
/// result holds clones of the selected records.
///
/// Name sorts are stable. Filters keep input order. A record whose compared
/// value is missing is excluded from every filtered variant.
pub fn derive_list(nannies: &[Nanny], option: SortOption) -> Vec<Nanny> {
    let mut list = nannies.to_vec();

    match option {
        SortOption::SortAsc => sort_by_name(&mut list, false),
        SortOption::SortDesc => sort_by_name(&mut list, true),
        SortOption::PriceLessThanTen => {
            list.retain(|n| n.price_per_hour.is_some_and(|p| p <= PRICE_THRESHOLD))
        }
        SortOption::PriceGreaterThanTen => {
            list.retain(|n| n.price_per_hour.is_some_and(|p| p > PRICE_THRESHOLD))
        }
        SortOption::Popular => list.retain(|n| n.rating.is_some_and(|r| r >= POPULAR_RATING)),
        SortOption::Unpopular => list.retain(|n| n.rating.is_some_and(|r| r < POPULAR_RATING)),
        SortOption::All => {}
    }

    list
}

fn sort_by_name(list: &mut [Nanny], descending: bool) {
    let mut collator = Collator::default();
    list.sort_by(|a, b| {
        let order = collate(&mut collator, &a.name, &b.name);
        if descending {
            order.reverse()
        } else {
            order
        }
    });
}

/// Unicode Collation Algorithm order (CLDR root): base letters first, then
/// accents, then case with lowercase ahead. Raw code points break the
/// remaining ties so the order is total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collate(&mut Collator::default(), a, b)
}

fn collate(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    collator.collate(a, b).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nanny(id: &str, name: &str, price: Option<f64>, rating: Option<f64>) -> Nanny {
        Nanny {
            id: id.to_string(),
            name: name.to_string(),
            location: String::new(),
            price_per_hour: price,
            rating,
            birthday: None,
            experience: String::new(),
            kids_age: String::new(),
            characters: Vec::new(),
            education: String::new(),
            about: String::new(),
            avatar_url: String::new(),
            reviews: Vec::new(),
        }
    }

    fn names(list: &[Nanny]) -> Vec<&str> {
        list.iter().map(|n| n.name.as_str()).collect()
    }

    fn ids(list: &[Nanny]) -> Vec<&str> {
        list.iter().map(|n| n.id.as_str()).collect()
    }

    fn anna_and_zoe() -> Vec<Nanny> {
        vec![
            nanny("1", "Anna", Some(8.0), Some(4.5)),
            nanny("2", "Zoe", Some(15.0), Some(3.0)),
        ]
    }

    fn mixed() -> Vec<Nanny> {
        vec![
            nanny("a", "Olga", Some(10.0), Some(4.0)),
            nanny("b", "anna", Some(9.99), Some(3.99)),
            nanny("c", "Émilie", Some(10.01), Some(5.0)),
            nanny("d", "Bohdana", Some(22.0), Some(0.0)),
            nanny("e", "Anna", Some(7.0), Some(4.8)),
            nanny("f", "Zlata", Some(12.0), Some(4.1)),
        ]
    }

    #[test]
    fn test_worked_example() {
        let list = anna_and_zoe();
        assert_eq!(names(&derive_list(&list, SortOption::SortAsc)), vec!["Anna", "Zoe"]);
        assert_eq!(names(&derive_list(&list, SortOption::PriceLessThanTen)), vec!["Anna"]);
        assert_eq!(names(&derive_list(&list, SortOption::Popular)), vec!["Anna"]);
        assert_eq!(names(&derive_list(&list, SortOption::Unpopular)), vec!["Zoe"]);
        assert_eq!(names(&derive_list(&list, SortOption::PriceGreaterThanTen)), vec!["Zoe"]);
        assert_eq!(derive_list(&list, SortOption::All), list);
    }

    #[test]
    fn test_empty_input() {
        for opt in SortOption::ALL {
            assert!(derive_list(&[], opt).is_empty());
        }
    }

    #[test]
    fn test_never_adds_or_duplicates() {
        let list = mixed();
        for opt in SortOption::ALL {
            let derived = derive_list(&list, opt);
            let mut derived_ids = ids(&derived);
            derived_ids.sort_unstable();
            let before = derived_ids.len();
            derived_ids.dedup();
            assert_eq!(before, derived_ids.len(), "{} duplicated records", opt);
            assert!(derived_ids.iter().all(|id| list.iter().any(|n| n.id == *id)));
        }
    }

    #[test]
    fn test_input_untouched() {
        let list = mixed();
        let snapshot = list.clone();
        for opt in SortOption::ALL {
            let _ = derive_list(&list, opt);
        }
        assert_eq!(list, snapshot);
    }

    #[test]
    fn test_show_all_identity_and_idempotence() {
        let list = mixed();
        let once = derive_list(&list, SortOption::All);
        assert_eq!(once, list);
        assert_eq!(derive_list(&once, SortOption::All), once);
    }

    #[test]
    fn test_price_partition_at_ten() {
        let list = mixed();
        let low = derive_list(&list, SortOption::PriceLessThanTen);
        let high = derive_list(&list, SortOption::PriceGreaterThanTen);

        assert_eq!(ids(&low), vec!["a", "b", "e"]);
        assert_eq!(ids(&high), vec!["c", "d", "f"]);
        assert_eq!(low.len() + high.len(), list.len());
        assert!(low.iter().all(|n| !high.contains(n)));
    }

    #[test]
    fn test_popularity_partition_at_four() {
        let list = mixed();
        let popular = derive_list(&list, SortOption::Popular);
        let unpopular = derive_list(&list, SortOption::Unpopular);

        // rating exactly 4.0 counts as popular
        assert_eq!(ids(&popular), vec!["a", "c", "e", "f"]);
        assert_eq!(ids(&unpopular), vec!["b", "d"]);
        assert_eq!(popular.len() + unpopular.len(), list.len());
    }

    #[test]
    fn test_missing_values_are_excluded_from_filters() {
        let list = vec![
            nanny("1", "Ira", None, None),
            nanny("2", "Mila", Some(5.0), Some(4.5)),
        ];
        for opt in [
            SortOption::PriceLessThanTen,
            SortOption::PriceGreaterThanTen,
            SortOption::Popular,
            SortOption::Unpopular,
        ] {
            assert!(!ids(&derive_list(&list, opt)).contains(&"1"), "{}", opt);
        }
        assert_eq!(derive_list(&list, SortOption::SortAsc).len(), 2);
    }

    #[test]
    fn test_sorts_are_locale_aware() {
        let list = mixed();
        assert_eq!(
            names(&derive_list(&list, SortOption::SortAsc)),
            vec!["anna", "Anna", "Bohdana", "Émilie", "Olga", "Zlata"]
        );
    }

    #[test]
    fn test_asc_and_desc_are_reversed_for_distinct_names() {
        let list = vec![
            nanny("1", "Zlata", None, None),
            nanny("2", "Ólga", None, None),
            nanny("3", "Anna", None, None),
            nanny("4", "bohdana", None, None),
        ];
        let asc = names(&derive_list(&list, SortOption::SortAsc))
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        let mut desc = names(&derive_list(&list, SortOption::SortDesc))
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        desc.reverse();
        assert_eq!(asc, desc);
        assert_eq!(asc, vec!["Anna", "bohdana", "Ólga", "Zlata"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_names() {
        let list = vec![
            nanny("first", "Anna", Some(1.0), None),
            nanny("x", "Bella", None, None),
            nanny("second", "Anna", Some(2.0), None),
        ];
        let asc = derive_list(&list, SortOption::SortAsc);
        assert_eq!(ids(&asc), vec!["first", "second", "x"]);
        let desc = derive_list(&list, SortOption::SortDesc);
        assert_eq!(ids(&desc), vec!["x", "first", "second"]);
    }

    #[test]
    fn test_locale_cmp() {
        assert_eq!(locale_cmp("a", "B"), Ordering::Less);
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("é", "f"), Ordering::Less);
        assert_eq!(locale_cmp("e", "é"), Ordering::Less);
        assert_eq!(locale_cmp("Anna", "Anna"), Ordering::Equal);
    }

    #[test]
    fn test_accents_outrank_case() {
        assert_eq!(locale_cmp("Emile", "émile"), Ordering::Less);
        let list = vec![nanny("1", "émile", None, None), nanny("2", "Emile", None, None)];
        assert_eq!(
            names(&derive_list(&list, SortOption::SortAsc)),
            vec!["Emile", "émile"]
        );
    }

    #[test]
    fn test_cyrillic_names_in_alphabet_order() {
        let list: Vec<Nanny> = ["Катя", "Іра", "Жанна", "Єва", "Анна", "Ґанна"]
            .iter()
            .enumerate()
            .map(|(i, name)| nanny(&i.to_string(), name, None, None))
            .collect();

        assert_eq!(
            names(&derive_list(&list, SortOption::SortAsc)),
            vec!["Анна", "Ґанна", "Єва", "Жанна", "Іра", "Катя"]
        );
        assert_eq!(
            names(&derive_list(&list, SortOption::SortDesc)),
            vec!["Катя", "Іра", "Жанна", "Єва", "Ґанна", "Анна"]
        );
    }
}
