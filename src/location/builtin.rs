//! Built-in coordinate table.
//!
//! `(city, latitude, longitude, [(district, latitude, longitude)])`

pub(super) type DistrictRow = (&'static str, f64, f64);
pub(super) type CityRow = (&'static str, f64, f64, &'static [DistrictRow]);

pub(super) static CITIES: &[CityRow] = &[
    (
        "istanbul",
        41.0082,
        28.9784,
        &[
            ("kadikoy", 40.9906, 29.0230),
            ("uskudar", 41.0256, 29.0157),
            ("besiktas", 41.0430, 29.0094),
            ("fatih", 41.0186, 28.9397),
        ],
    ),
    (
        "ankara",
        39.9334,
        32.8597,
        &[("cankaya", 39.9179, 32.8627), ("kecioren", 39.9800, 32.8650)],
    ),
    (
        "izmir",
        38.4237,
        27.1428,
        &[
            ("bornova", 38.4697, 27.2211),
            ("karsiyaka", 38.4594, 27.1153),
            ("konak", 38.4189, 27.1287),
        ],
    ),
    ("bursa", 40.1885, 29.0610, &[("osmangazi", 40.1950, 29.0600)]),
    ("antalya", 36.8969, 30.7133, &[("muratpasa", 36.8850, 30.7040)]),
    ("konya", 37.8746, 32.4932, &[("selcuklu", 37.9300, 32.5000)]),
    ("adana", 37.0000, 35.3213, &[]),
    ("gaziantep", 37.0662, 37.3833, &[]),
    ("kayseri", 38.7312, 35.4787, &[]),
    ("trabzon", 41.0027, 39.7168, &[]),
    ("erzurum", 39.9043, 41.2679, &[]),
    ("diyarbakir", 37.9144, 40.2306, &[]),
];
