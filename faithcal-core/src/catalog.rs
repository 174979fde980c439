//! The built-in observance catalog.
//!
//! A fixed list of dated entries across five traditions. This is static
//! configuration data, not a recurrence engine: dates are month/day values
//! stamped with a concrete year, and the catalog is rebuilt per year.

use chrono::NaiveDate;

use crate::event::{EventKind, ReligiousEvent, Tradition};

/// The read-only set of religious events for one or more years.
#[derive(Debug, Clone)]
pub struct Catalog {
    events: Vec<ReligiousEvent>,
}

impl Catalog {
    /// Build the catalog for a single year.
    pub fn for_year(year: i32) -> Self {
        Catalog {
            events: events_for_year(year),
        }
    }

    /// Build the catalog for several years (e.g. a range crossing a year
    /// boundary). Duplicate years are skipped.
    pub fn for_years(years: impl IntoIterator<Item = i32>) -> Self {
        let mut seen = Vec::new();
        let mut events = Vec::new();
        for year in years {
            if seen.contains(&year) {
                continue;
            }
            seen.push(year);
            events.extend(events_for_year(year));
        }
        Catalog { events }
    }

    pub fn events(&self) -> &[ReligiousEvent] {
        &self.events
    }

    /// Look up a catalog entry by id (e.g. "diwali-2024").
    pub fn get(&self, id: &str) -> Option<&ReligiousEvent> {
        self.events.iter().find(|e| e.id == id)
    }
}

// =============================================================================
// Internal: entry construction
// =============================================================================

struct Entry {
    event: ReligiousEvent,
    year: i32,
}

fn entry(
    year: i32,
    slug: &str,
    title: &str,
    (month, day): (u32, u32),
    tradition: Tradition,
    kind: EventKind,
) -> Entry {
    Entry {
        event: ReligiousEvent {
            id: format!("{slug}-{year}"),
            title: title.to_string(),
            start_date: date(year, month, day),
            end_date: None,
            tradition,
            kind,
            description: None,
            significance: None,
            customs: Vec::new(),
        },
        year,
    }
}

impl Entry {
    fn until(mut self, (month, day): (u32, u32)) -> Self {
        let end = date(self.year, month, day);
        debug_assert!(end >= self.event.start_date);
        self.event.end_date = Some(end);
        self
    }

    fn desc(mut self, text: &str) -> Self {
        self.event.description = Some(text.to_string());
        self
    }

    fn significance(mut self, text: &str) -> Self {
        self.event.significance = Some(text.to_string());
        self
    }

    fn customs(mut self, customs: &[&str]) -> Self {
        self.event.customs = customs.iter().map(|c| c.to_string()).collect();
        self
    }

    fn build(self) -> ReligiousEvent {
        self.event
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    // Catalog data only uses valid month/day pairs
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn events_for_year(year: i32) -> Vec<ReligiousEvent> {
    use EventKind::*;
    use Tradition::*;

    vec![
        // Christianity
        entry(year, "christmas", "Christmas", (12, 25), Christianity, Holiday)
            .desc("Celebration of the birth of Jesus Christ")
            .significance("The most important Christian holiday celebrating the incarnation of God")
            .customs(&["Gift giving", "Christmas tree", "Nativity scenes", "Church services"])
            .build(),
        entry(year, "christmas-eve", "Christmas Eve", (12, 24), Christianity, Observance)
            .desc("The evening before Christmas Day")
            .customs(&["Midnight Mass", "Family gatherings", "Gift opening"])
            .build(),
        entry(year, "easter", "Easter Sunday", (3, 31), Christianity, Holiday)
            .desc("Resurrection of Jesus Christ")
            .significance("The most important event in Christianity")
            .customs(&["Easter eggs", "Church services", "Easter bunny", "Family meals"])
            .build(),
        entry(year, "good-friday", "Good Friday", (3, 29), Christianity, Observance)
            .desc("Commemoration of the crucifixion of Jesus")
            .customs(&["Fasting", "Church services", "Stations of the Cross"])
            .build(),
        entry(year, "palm-sunday", "Palm Sunday", (3, 24), Christianity, Observance)
            .desc("Jesus's triumphal entry into Jerusalem")
            .customs(&["Palm branches", "Processions", "Special church services"])
            .build(),
        entry(year, "epiphany", "Epiphany", (1, 6), Christianity, Holiday)
            .desc("Celebration of the visit of the Magi to baby Jesus")
            .customs(&["Gift giving", "King cake", "Blessing of homes"])
            .build(),
        entry(year, "pentecost", "Pentecost", (5, 19), Christianity, Holiday)
            .desc("Descent of the Holy Spirit upon the apostles")
            .customs(&["Special church services", "Confirmation ceremonies", "Red vestments"])
            .build(),
        entry(year, "all-saints-day", "All Saints' Day", (11, 1), Christianity, Observance)
            .desc("Honoring all saints and martyrs")
            .customs(&["Church services", "Grave visits", "Lighting candles"])
            .build(),
        // Islam
        entry(year, "eid-al-fitr", "Eid al-Fitr", (4, 10), Islam, Celebration)
            .until((4, 12))
            .desc("Festival of Breaking the Fast - end of Ramadan")
            .significance("One of the most important Islamic holidays")
            .customs(&["Special prayers", "Charity (Zakat)", "Family gatherings", "Gift giving", "Feasting"])
            .build(),
        entry(year, "eid-al-adha", "Eid al-Adha", (6, 16), Islam, Celebration)
            .until((6, 19))
            .desc("Festival of Sacrifice commemorating Abraham's willingness to sacrifice his son")
            .significance("Coincides with Hajj pilgrimage")
            .customs(&["Animal sacrifice", "Charity", "Pilgrimage", "Family gatherings"])
            .build(),
        entry(year, "ramadan", "Ramadan", (3, 11), Islam, Observance)
            .until((4, 9))
            .desc("Holy month of fasting, prayer, and reflection")
            .significance("The month the Quran was revealed")
            .customs(&["Fasting from dawn to sunset", "Nightly prayers", "Charity", "Iftar meals"])
            .build(),
        entry(year, "laylat-al-qadr", "Laylat al-Qadr (Night of Power)", (4, 5), Islam, Observance)
            .desc("The night the first verses of the Quran were revealed")
            .customs(&["Night-long prayers", "Quran recitation", "Seeking forgiveness"])
            .build(),
        entry(year, "mawlid", "Mawlid al-Nabi", (9, 27), Islam, Celebration)
            .desc("Birthday of the Prophet Muhammad")
            .customs(&["Processions", "Devotional poetry", "Communal meals"])
            .build(),
        entry(year, "muharram", "Muharram (Islamic New Year)", (7, 7), Islam, Observance)
            .desc("First month of Islamic calendar")
            .customs(&["Reflection", "Prayer", "Charity"])
            .build(),
        entry(year, "ashura", "Day of Ashura", (7, 17), Islam, Observance)
            .desc("Day of remembrance and fasting")
            .significance("Commemorates various historical events")
            .customs(&["Fasting", "Prayer", "Charity", "Reflection"])
            .build(),
        // Judaism
        entry(year, "passover", "Passover (Pesach)", (4, 22), Judaism, Holiday)
            .until((4, 30))
            .desc("Commemoration of the Exodus from Egypt")
            .significance("One of the most important Jewish festivals")
            .customs(&["Seder meals", "Matzah", "Retelling the Exodus story"])
            .build(),
        entry(year, "rosh-hashanah", "Rosh Hashanah", (9, 15), Judaism, Holiday)
            .until((9, 17))
            .desc("Jewish New Year")
            .significance("Beginning of the High Holy Days")
            .customs(&["Shofar blowing", "Apples and honey", "Synagogue services"])
            .build(),
        entry(year, "yom-kippur", "Yom Kippur", (9, 24), Judaism, Fast)
            .desc("Day of Atonement")
            .significance("The holiest day in Judaism")
            .customs(&["25-hour fast", "Prayer", "Repentance", "Synagogue services"])
            .build(),
        entry(year, "sukkot", "Sukkot", (9, 29), Judaism, Holiday)
            .until((10, 6))
            .desc("Feast of Tabernacles")
            .customs(&["Building sukkahs", "Waving the lulav and etrog", "Festive meals"])
            .build(),
        entry(year, "hanukkah", "Hanukkah", (12, 7), Judaism, Celebration)
            .until((12, 15))
            .desc("Festival of Lights commemorating the rededication of the Second Temple")
            .customs(&["Lighting the menorah", "Dreidel games", "Fried foods", "Gift giving"])
            .build(),
        entry(year, "purim", "Purim", (3, 13), Judaism, Celebration)
            .desc("Celebration of the salvation of the Jewish people in ancient Persia")
            .customs(&["Reading the Megillah", "Costumes", "Festive meals", "Charity"])
            .build(),
        // Hinduism
        entry(year, "diwali", "Diwali", (11, 1), Hinduism, Celebration)
            .until((11, 5))
            .desc("Festival of Lights celebrating the victory of light over darkness")
            .significance("One of the most important Hindu festivals")
            .customs(&["Oil lamps", "Fireworks", "Rangoli", "Sweets", "Lakshmi puja"])
            .build(),
        entry(year, "holi", "Holi", (3, 25), Hinduism, Celebration)
            .until((3, 26))
            .desc("Festival of Colors welcoming spring")
            .customs(&["Throwing colored powder", "Water games", "Bonfires", "Sweets"])
            .build(),
        entry(year, "navratri", "Navratri", (10, 3), Hinduism, Observance)
            .until((10, 12))
            .desc("Nine nights honoring the goddess Durga")
            .customs(&["Fasting", "Garba dancing", "Durga puja"])
            .build(),
        entry(year, "dussehra", "Dussehra (Vijayadashami)", (10, 12), Hinduism, Celebration)
            .desc("Victory of good over evil - Rama's victory over Ravana")
            .customs(&["Burning effigies", "Ramlila performances", "Weapon worship"])
            .build(),
        entry(year, "krishna-janmashtami", "Krishna Janmashtami", (8, 26), Hinduism, Celebration)
            .desc("Birthday of Lord Krishna")
            .customs(&["Midnight celebrations", "Dahi Handi", "Bhajans", "Fasting", "Decorating cradles"])
            .build(),
        entry(year, "ganesh-chaturthi", "Ganesh Chaturthi", (9, 7), Hinduism, Celebration)
            .until((9, 17))
            .desc("Birthday of Lord Ganesha")
            .customs(&["Ganesha idols", "Processions", "Modak sweets", "Immersion ceremony"])
            .build(),
        entry(year, "karva-chauth", "Karva Chauth", (11, 1), Hinduism, Observance)
            .desc("Fast observed by married women for their husbands' longevity")
            .customs(&["Day-long fast", "Moon sighting", "Mehendi", "Special prayers"])
            .build(),
        // Buddhism
        entry(year, "vesak", "Vesak Day (Buddha Day)", (5, 23), Buddhism, Holiday)
            .desc("Celebration of Buddha's birth, enlightenment, and death")
            .significance("Most important Buddhist holiday")
            .customs(&["Temple visits", "Meditation", "Chanting", "Acts of kindness", "Lantern festivals"])
            .build(),
        entry(year, "dharma-day", "Dharma Day", (7, 16), Buddhism, Observance)
            .desc("Celebration of Buddha's first teaching")
            .customs(&["Meditation", "Study of Buddhist texts", "Chanting", "Temple visits"])
            .build(),
        entry(year, "sangha-day", "Sangha Day", (2, 24), Buddhism, Observance)
            .desc("Celebration of the Buddhist community")
            .customs(&["Community gatherings", "Meditation", "Teaching sessions"])
            .build(),
        entry(year, "kathina", "Kathina", (10, 15), Buddhism, Ceremony)
            .until((11, 13))
            .desc("Annual robe offering ceremony for monks")
            .customs(&["Robe offerings", "Merit making", "Community donations"])
            .build(),
        entry(year, "magha-puja", "Magha Puja", (2, 24), Buddhism, Observance)
            .desc("Commemoration of Buddha's teachings to 1,250 disciples")
            .customs(&["Candlelight processions", "Meditation", "Merit making"])
            .build(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_all_traditions() {
        let catalog = Catalog::for_year(2024);
        for tradition in Tradition::ALL {
            assert!(
                catalog.events().iter().any(|e| e.tradition == tradition),
                "no events for {tradition}"
            );
        }
    }

    #[test]
    fn ids_embed_the_year() {
        let catalog = Catalog::for_year(2024);
        let diwali = catalog.get("diwali-2024").unwrap();
        assert_eq!(diwali.title, "Diwali");
        assert_eq!(diwali.start_date, NaiveDate::from_ymd_opt(2024, 11, 1).unwrap());
        assert_eq!(diwali.end_date, Some(NaiveDate::from_ymd_opt(2024, 11, 5).unwrap()));
        assert!(catalog.get("diwali-2025").is_none());
    }

    #[test]
    fn multi_day_spans_end_after_they_start() {
        let catalog = Catalog::for_year(2025);
        for event in catalog.events() {
            assert!(event.span_end() >= event.start_date, "{} span inverted", event.id);
        }
    }

    #[test]
    fn for_years_skips_duplicates() {
        let single = Catalog::for_year(2024);
        let doubled = Catalog::for_years([2024, 2024]);
        assert_eq!(single.events().len(), doubled.events().len());

        let two_years = Catalog::for_years([2024, 2025]);
        assert_eq!(two_years.events().len(), single.events().len() * 2);
        assert!(two_years.get("christmas-2025").is_some());
    }
}
