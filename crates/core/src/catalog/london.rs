//! Built-in London catalog data.

pub(super) struct Entry {
    pub name: &'static str,
    pub lines: &'static [&'static str],
    pub trivia: &'static str,
    pub location: &'static str,
}

pub(super) const LINES: [(&str, &str); 16] = [
    ("Bakerloo", "#996633"),
    ("Central", "#DC241F"),
    ("Circle", "#FFD320"),
    ("District", "#007D32"),
    ("Hammersmith & City", "#D799AF"),
    ("Jubilee", "#6A7278"),
    ("Metropolitan", "#751056"),
    ("Northern", "#000000"),
    ("Piccadilly", "#2E7DF6"),
    ("Victoria", "#00A0E2"),
    ("Elizabeth", "#6950A1"),
    ("DLR", "#00AFAD"),
    ("Overground", "#E86A10"),
    ("Waterloo & City", "#76D0BD"),
    ("Tram", "#84B817"),
    ("National Rail", "#000080"),
];

pub(super) const STATIONS: &[Entry] = &[
    Entry {
        name: "King's Cross St. Pancras",
        lines: &[
            "Circle",
            "Hammersmith & City",
            "Metropolitan",
            "Northern",
            "Piccadilly",
            "Victoria",
            "National Rail",
        ],
        trivia: "here you can find platforms for both the Eurostar and the Hogwarts Express.",
        location: "North London",
    },
    Entry {
        name: "Liverpool Street",
        lines: &["Circle", "Hammersmith & City", "Central", "Metropolitan"],
        trivia: "situated near a famously historic market, containing a herd of metal elephants.",
        location: "Central London",
    },
    Entry {
        name: "Oxford Circus",
        lines: &["Bakerloo", "Central", "Victoria"],
        trivia: "located at the intersection of one of the busiest shopping areas in Europe.",
        location: "Central London",
    },
    Entry {
        name: "Bond Street",
        lines: &["Central", "Jubilee"],
        trivia: "one of the world's most famous luxury shopping destinations, home to brands like Chanel, Louis Vuitton, Cartier, and Sotheby's auction house.",
        location: "Central London",
    },
    Entry {
        name: "Green Park",
        lines: &["Jubilee", "Piccadilly", "Victoria"],
        trivia: "near a park that is unusual in that it has no permanent statues or buildings, just memorials.",
        location: "Central London",
    },
    Entry {
        name: "Leicester Square",
        lines: &["Northern", "Piccadilly"],
        trivia: "alight here for cinemas and restaurants in the heart of London's West End theatre district.",
        location: "Central London",
    },
    Entry {
        name: "Piccadilly Circus",
        lines: &["Bakerloo", "Piccadilly"],
        trivia: "famous for its neon signs and the Shaftesbury Memorial Fountain with its statue of Anteros, often mistaken for Eros.",
        location: "Central London",
    },
    Entry {
        name: "Victoria",
        lines: &["Circle", "District", "Victoria", "National Rail"],
        trivia: "contrary to popular belief, this station was not named after a famous monarch.",
        location: "Central London",
    },
    Entry {
        name: "Waterloo",
        lines: &["Bakerloo", "Jubilee", "Northern", "Waterloo & City", "National Rail"],
        trivia: "the UK's busiest railway station by passenger usage.",
        location: "South London",
    },
    Entry {
        name: "London Bridge",
        lines: &["Jubilee", "Northern", "National Rail"],
        trivia: "the oldest railway terminus in London, opened in 1836.",
        location: "South London",
    },
    Entry {
        name: "Bank",
        lines: &["Central", "Northern", "Waterloo & City"],
        trivia: "this forms a complex with Monument station and serves the City of London.",
        location: "Central London",
    },
    Entry {
        name: "Westminster",
        lines: &["Circle", "District", "Jubilee"],
        trivia: "alight here for Big Ben and the Houses of Parliament",
        location: "Central London",
    },
    Entry {
        name: "Embankment",
        lines: &["Bakerloo", "Circle", "District", "Northern"],
        trivia: "The only place on the Underground where you can still hear \"Mind the Gap\" announced by Oswald Laurence",
        location: "Central London",
    },
    Entry {
        name: "Charing Cross",
        lines: &["Bakerloo", "Northern"],
        trivia: "traditionally considered the center of London for distance measurements.",
        location: "Central London",
    },
    Entry {
        name: "Tottenham Court Road",
        lines: &["Central", "Northern", "Elizabeth"],
        trivia: "its name has nothing to do with a famous north London football club.",
        location: "Central London",
    },
    Entry {
        name: "Holborn",
        lines: &["Central", "Piccadilly"],
        trivia: "named after the nearby River Fleet, it serves the legal district of London.",
        location: "Central London",
    },
    Entry {
        name: "Euston",
        lines: &["Northern", "Victoria", "Overground"],
        trivia: "The main London terminus for trains to the midlands, North West and Scotland.",
        location: "North London",
    },
    Entry {
        name: "Earl's Court",
        lines: &["District", "Piccadilly"],
        trivia: "once home to a famous exhibition center, it's a major interchange station serving West London.",
        location: "West London",
    },
    Entry {
        name: "South Kensington",
        lines: &["Circle", "District", "Piccadilly"],
        trivia: "alight here for Museum Row.",
        location: "West London",
    },
    Entry {
        name: "Notting Hill Gate",
        lines: &["Central", "Circle", "District"],
        trivia: "alight here for row of colourful houses and Portobello Road Market.",
        location: "West London",
    },
    Entry {
        name: "Baker Street",
        lines: &["Bakerloo", "Circle", "Hammersmith & City", "Jubilee", "Metropolitan"],
        trivia: "alight here for the fictional home of Sherlock Holmes.",
        location: "Central London",
    },
    Entry {
        name: "Paddington",
        lines: &[
            "Bakerloo",
            "Circle",
            "District",
            "Hammersmith & City",
            "Elizabeth",
            "National Rail",
        ],
        trivia: "a famous fictional bear is named after this station.",
        location: "West London",
    },
    Entry {
        name: "Edgware Road",
        lines: &["Bakerloo", "Circle", "District", "Hammersmith & City"],
        trivia: "actually two physically separate stations amidst a large middle eastern community.",
        location: "West London",
    },
    Entry {
        name: "Mile End",
        lines: &["Central", "District", "Hammersmith & City"],
        trivia: "named after its location, it's one mile from the old City of London boundary at Aldgate.",
        location: "East London",
    },
    Entry {
        name: "Finchley Road",
        lines: &["Jubilee", "Metropolitan"],
        trivia: "serves the affluent areas of Swiss Cottage, St. John's Wood and Hampstead.",
        location: "North London",
    },
    Entry {
        name: "Hammersmith",
        lines: &["Circle", "District", "Hammersmith & City", "Piccadilly"],
        trivia: "near a famous suspension bridge that was deemed too weak to support cars and pedestrianised.",
        location: "West London",
    },
    Entry {
        name: "Stockwell",
        lines: &["Northern", "Victoria"],
        trivia: "serves as an important interchange between North and South London.",
        location: "South London",
    },
    Entry {
        name: "Balham",
        lines: &["Northern", "National Rail"],
        trivia: "known as the 'Gateway to the South', this station serves both Underground and National Rail services in South London.",
        location: "South London",
    },
    Entry {
        name: "Clapham Junction",
        lines: &["National Rail"],
        trivia: "Britain's busiest railway station by train movements, handling over 2,000 trains per day with no Underground connection.",
        location: "South London",
    },
    Entry {
        name: "Finsbury Park",
        lines: &["Piccadilly", "Victoria"],
        trivia: "serves a major music venue and one of North London's largest green spaces, popular for festivals and events.",
        location: "North London",
    },
    Entry {
        name: "Barking",
        lines: &["District", "Hammersmith & City", "Overground"],
        trivia: "This East London station was the terminus of the world's first electric tube railway when it opened in 1902.",
        location: "East London",
    },
    Entry {
        name: "West Ham",
        lines: &["Jubilee", "District", "DLR", "Elizabeth"],
        trivia: "Forever Blowing Bubbles",
        location: "East London",
    },
    Entry {
        name: "Moorgate",
        lines: &["Circle", "Hammersmith & City", "Metropolitan", "Northern", "Elizabeth"],
        trivia: "Named after one of the ancient gates in the London Wall, this station serves the financial district.",
        location: "Central London",
    },
    Entry {
        name: "Acton Town",
        lines: &["District", "Piccadilly"],
        trivia: "An important junction title meaning Oak Town",
        location: "West London",
    },
    Entry {
        name: "Ealing Common",
        lines: &["District", "Piccadilly"],
        trivia: "This area earned the nickname \"The Queen of the Suburbs\"",
        location: "West London",
    },
    Entry {
        name: "Farringdon",
        lines: &["Circle", "Hammersmith & City", "Metropolitan", "Elizabeth", "National Rail"],
        trivia: "a major Elizabeth line hub connecting to Thameslink services, serving the historic Smithfield Market area.",
        location: "Central London",
    },
    Entry {
        name: "Whitechapel",
        lines: &["District", "Hammersmith & City", "Elizabeth"],
        trivia: "historic East London station famous for its connection to Jack the Ripper.",
        location: "East London",
    },
    Entry {
        name: "Canary Wharf",
        lines: &["Jubilee", "Elizabeth", "DLR"],
        trivia: "London's financial district skyscraper hub surrounded by waterways.",
        location: "East London",
    },
    Entry {
        name: "Stratford",
        lines: &["Central", "Jubilee", "Elizabeth", "DLR"],
        trivia: "received a massive upgrade for the 2012 Olympic Games.",
        location: "East London",
    },
    Entry {
        name: "Tower Gateway",
        lines: &["DLR", "Circle", "District"],
        trivia: "a lesser known station, it serves the iconic Tower of London and Tower Bridge.",
        location: "Central London",
    },
    Entry {
        name: "Custom House",
        lines: &["Elizabeth", "DLR"],
        trivia: "modern interchange station serving the ExCeL London exhibition center and London City Airport area.",
        location: "East London",
    },
    Entry {
        name: "Highbury & Islington",
        lines: &["Northern", "Victoria", "Overground"],
        trivia: "named after the two main areas it serves.",
        location: "North London",
    },
    Entry {
        name: "Canada Water",
        lines: &["Jubilee", "Overground"],
        trivia: "one of two stations with another country in its name.",
        location: "South East London",
    },
    Entry {
        name: "Richmond",
        lines: &["District", "Overground"],
        trivia: "alight here if you want to go deer-spotting.",
        location: "South West London",
    },
    Entry {
        name: "Wimbledon",
        lines: &["District", "Tram"],
        trivia: "Famous worldwide for its tennis championships",
        location: "South West London",
    },
    Entry {
        name: "Willesden Junction",
        lines: &["Bakerloo", "Overground"],
        trivia: "originally known as \"The Wilderness\" due to its complex network of entrances and passages",
        location: "North West London",
    },
    Entry {
        name: "West Brompton",
        lines: &["District", "Overground"],
        trivia: "It's got a compass direction in the name.",
        location: "West London",
    },
    Entry {
        name: "Kensington Olympia",
        lines: &["District", "Overground"],
        trivia: "once home to a major exhibition center and events venue, now serves residential West London with connections to both Underground and Overground services.",
        location: "West London",
    },
    Entry {
        name: "Shepherd's Bush",
        lines: &["Central", "Overground"],
        trivia: "a major West London transport hub serving the shopping and entertainment district, including the famous Westfield shopping center.",
        location: "West London",
    },
    Entry {
        name: "Ealing Broadway",
        lines: &["Central", "Elizabeth"],
        trivia: "The western terminus of the Central line and a major Elizabeth line station, serving as a key transport hub for West London and beyond.",
        location: "West London",
    },
    Entry {
        name: "Shadwell",
        lines: &["DLR", "Overground"],
        trivia: "historic East London station in the heart of the former docklands.",
        location: "East London",
    },
    Entry {
        name: "Warren Street",
        lines: &["Northern", "Victoria"],
        trivia: "named after a developer who built houses in the area, it serves the bustling Fitzrovia district near the BBC Broadcasting House.",
        location: "Central London",
    },
];
