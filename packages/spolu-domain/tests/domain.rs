use spolu_domain::{geo, text};

#[test]
fn similarity_stays_in_unit_interval() {
	let pairs = [
		("", ""),
		("", "abc"),
		("pra", "praha"),
		("kitten", "sitting"),
		("úplně jiný text", "praha"),
	];

	for (a, b) in pairs {
		let score = text::similarity(a, b);

		assert!((0.0..=1.0).contains(&score), "similarity({a:?}, {b:?}) = {score}");
	}
}

#[test]
fn similarity_is_symmetric() {
	let pairs = [("pra", "praha"), ("kitten", "sitting"), ("", "abc"), ("brno", "Brno")];

	for (a, b) in pairs {
		assert_eq!(text::similarity(a, b), text::similarity(b, a));
	}
}

#[test]
fn similarity_of_identical_strings_is_one() {
	for value in ["", "praha", "Frýdek-Místek", "a"] {
		assert_eq!(text::similarity(value, value), 1.0);
	}
}

#[test]
fn edit_distance_is_exact() {
	assert_eq!(text::edit_distance("kitten", "sitting"), 3);
	assert_eq!(text::edit_distance("", "abc"), 3);
	assert_eq!(text::edit_distance("abc", "abc"), 0);
	assert_eq!(text::edit_distance("abc", ""), 3);
}

#[test]
fn confidence_of_exact_match_is_one() {
	for value in ["p", "praha", "Hradec Králové"] {
		assert_eq!(text::confidence(value, value), 1.0);
	}
}

#[test]
fn prefix_match_never_lowers_confidence() {
	// "prah" is a prefix of "praha"; "prha" has the same edit distance but no
	// prefix relationship.
	let with_prefix = text::confidence("prah", "praha");
	let without_prefix = text::confidence("prha", "praha");

	assert!(with_prefix >= without_prefix);
}

#[test]
fn short_prefix_query_earns_both_bonuses() {
	let score = text::confidence("Pra", "Praha");

	assert!((score - 0.9).abs() < 1e-6);
}

#[test]
fn bucket_quantizes_to_about_one_kilometre() {
	let origin = geo::GeoPoint { lat: 50.08, lng: 14.43 };
	let same_cell = geo::GeoPoint { lat: 50.083, lng: 14.427 };
	let other_cell = geo::GeoPoint { lat: 50.13, lng: 14.43 };

	assert_eq!(geo::bucket(Some(origin)), geo::bucket(Some(same_cell)));
	assert_ne!(geo::bucket(Some(origin)), geo::bucket(Some(other_cell)));
}
