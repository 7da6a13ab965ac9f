//! Built-in attire, background and color tables

pub(super) const ATTIRE: &[(&str, &[(&str, &[&str])])] = &[
    (
        "Business Professional",
        &[
            ("man", &["dark suit with a {color} button-down shirt and tie"]),
            ("woman", &["{color} blouse with a dark suit"]),
            ("non-binary", &["dark suit with a {color} button-down shirt and tie"]),
        ],
    ),
    (
        "Business Casual",
        &[
            ("man", &["dark suit with a {color} button-down shirt and no tie"]),
            ("woman", &["{color} silk blouse"]),
            ("non-binary", &["dark suit with a {color} button-down shirt and no tie"]),
        ],
    ),
    (
        "Casual",
        &[
            (
                "man",
                &[
                    "{color} t-shirt",
                    "{color} hoodie",
                    "{color} flannel shirt",
                    "{color} cardigan",
                    "{color} turtleneck sweater",
                    "denim jacket",
                ],
            ),
            (
                "woman",
                &[
                    "{color} silk blouse",
                    "{color} loose top with wide collar",
                    "{color} flowy sundress",
                    "{color} turtleneck sweater",
                    "denim jacket",
                ],
            ),
            (
                "non-binary",
                &[
                    "{color} t-shirt",
                    "{color} hoodie",
                    "{color} flannel shirt",
                    "{color} cardigan",
                    "{color} turtleneck sweater",
                    "denim jacket",
                ],
            ),
        ],
    ),
    ("Doctor", &[("unisex", &["white coat with stethoscope"])]),
    (
        "Clinician",
        &[
            ("man", &["{color} scrubs"]),
            ("woman", &["{color} scrubs"]),
            ("non-binary", &["{color} scrubs"]),
        ],
    ),
];

pub(super) const BACKGROUNDS: &[(&str, &[&str])] = &[
    ("Light Gray", &["a neutral light grey professional studio photo background"]),
    ("Soft Gradient", &["a soft white gradient background"]),
    ("Corporate Office", &["a bright and modern corporate office overlooking the city"]),
    (
        "Natural Outdoors",
        &[
            "a picturesque view in front of snow-capped mountains with a clear blue sky",
            "a picturesque view in front of a golden hour sunlight over rolling hills.",
            "a picturesque view in front of a lush green park with a blurred city skyline.",
            "a picturesque view in front of ocean waves with soft pastel sunset.",
            "a picturesque view in front of vineyard rows with warm afternoon light.",
            "a picturesque view in front of cherry blossom trees in full bloom.",
            "a picturesque view in front of a rocky coastline with turquoise water.",
            "a picturesque view in front of a forest trail with dappled sunlight.",
        ],
    ),
    (
        "Trendy Indoor Space",
        &[
            "a picturesque view of the inside of a modern office with glass walls and city view.",
            "a picturesque view of the inside of a cozy library with warm lighting and bookshelves.",
            "a picturesque view of the inside of an industrial loft with exposed brick and steel beams.",
            "a picturesque view of the inside of a minimalist studio with soft natural light.",
            "a picturesque view of the inside of a chic café with plants and wood accents.",
            "a picturesque view of the inside of a corporate boardroom with sleek design.",
            "a picturesque view of the inside of an art gallery with clean white walls.",
            "a picturesque view of the inside of a home office with stylish décor and greenery.",
        ],
    ),
    ("Startup Office", &["a modern Bay-Area tech startup office"]),
];

pub(super) const COLORS: &[(&str, &str)] = &[
    ("Navy Blue", "#1A2B4C"),
    ("Charcoal Gray", "#36454F"),
    ("Black", "#000000"),
    ("White", "#FFFFFF"),
    ("Light Blue", "#ADD8E6"),
    ("Pale Gray", "#D3D3D3"),
    ("Beige", "#F5F5DC"),
    ("Burgundy", "#800020"),
    ("Emerald Green", "#50C878"),
    ("Soft Pink", "#F4C2C2"),
];

pub(super) const PHOTO_TYPES: &[(&str, &[&str])] = &[
    ("corporate", &["Business Professional", "Business Casual"]),
    ("casual", &["Business Casual", "Casual"]),
    ("medical", &["Doctor", "Clinician"]),
];
