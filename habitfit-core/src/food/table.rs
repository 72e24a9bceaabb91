//! Static nutrition table and the keyword mappings used to classify labels.

/// Nutrition per 100 g of a food, plus the gram weight of one serving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodEntry {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub serving_size: f64,
}

impl FoodEntry {
    pub const fn new(calories: f64, protein: f64, carbs: f64, fat: f64, serving_size: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
            serving_size,
        }
    }
}

/// Key returned when a label matches nothing.
pub const FALLBACK_FOOD: &str = "food";

/// All known foods. Partial matching scans in this order, so it must not be
/// re-sorted.
pub const FOOD_TABLE: &[(&str, FoodEntry)] = &[
    // Indian dishes
    ("dal", FoodEntry::new(116.0, 9.0, 20.0, 1.0, 150.0)),
    ("dal tadka", FoodEntry::new(150.0, 9.0, 20.0, 5.0, 150.0)),
    ("dal makhani", FoodEntry::new(200.0, 9.0, 18.0, 10.0, 150.0)),
    ("rajma", FoodEntry::new(140.0, 9.0, 23.0, 2.0, 150.0)),
    ("chole", FoodEntry::new(180.0, 10.0, 27.0, 4.0, 150.0)),
    ("chana masala", FoodEntry::new(180.0, 10.0, 27.0, 4.0, 150.0)),
    ("paneer", FoodEntry::new(265.0, 18.0, 4.0, 20.0, 100.0)),
    ("palak paneer", FoodEntry::new(220.0, 12.0, 8.0, 16.0, 150.0)),
    ("shahi paneer", FoodEntry::new(280.0, 12.0, 10.0, 22.0, 150.0)),
    ("paneer butter masala", FoodEntry::new(300.0, 12.0, 12.0, 24.0, 150.0)),
    ("butter chicken", FoodEntry::new(250.0, 20.0, 8.0, 16.0, 150.0)),
    ("chicken tikka masala", FoodEntry::new(230.0, 22.0, 10.0, 12.0, 150.0)),
    ("tandoori chicken", FoodEntry::new(180.0, 25.0, 5.0, 7.0, 150.0)),
    ("chicken biryani", FoodEntry::new(350.0, 18.0, 45.0, 12.0, 250.0)),
    ("veg biryani", FoodEntry::new(280.0, 8.0, 48.0, 8.0, 250.0)),
    ("biryani", FoodEntry::new(320.0, 15.0, 45.0, 10.0, 250.0)),
    ("pulao", FoodEntry::new(220.0, 5.0, 40.0, 5.0, 200.0)),
    ("jeera rice", FoodEntry::new(180.0, 4.0, 38.0, 2.0, 200.0)),
    ("roti", FoodEntry::new(71.0, 3.0, 15.0, 0.4, 30.0)),
    ("chapati", FoodEntry::new(71.0, 3.0, 15.0, 0.4, 30.0)),
    ("naan", FoodEntry::new(262.0, 9.0, 45.0, 5.0, 90.0)),
    ("paratha", FoodEntry::new(180.0, 4.0, 25.0, 7.0, 60.0)),
    ("aloo paratha", FoodEntry::new(220.0, 5.0, 30.0, 9.0, 80.0)),
    ("puri", FoodEntry::new(150.0, 3.0, 18.0, 8.0, 40.0)),
    ("bhatura", FoodEntry::new(280.0, 6.0, 35.0, 14.0, 80.0)),
    ("chole bhature", FoodEntry::new(450.0, 15.0, 55.0, 18.0, 200.0)),
    ("samosa", FoodEntry::new(260.0, 5.0, 30.0, 14.0, 80.0)),
    ("pakora", FoodEntry::new(180.0, 5.0, 18.0, 10.0, 60.0)),
    ("bhaji", FoodEntry::new(150.0, 3.0, 15.0, 9.0, 60.0)),
    ("pav bhaji", FoodEntry::new(380.0, 10.0, 50.0, 16.0, 200.0)),
    ("vada pav", FoodEntry::new(290.0, 6.0, 35.0, 14.0, 120.0)),
    ("idli", FoodEntry::new(39.0, 2.0, 8.0, 0.2, 40.0)),
    ("dosa", FoodEntry::new(120.0, 3.0, 18.0, 4.0, 80.0)),
    ("masala dosa", FoodEntry::new(200.0, 5.0, 28.0, 8.0, 120.0)),
    ("uttapam", FoodEntry::new(150.0, 4.0, 22.0, 5.0, 100.0)),
    ("upma", FoodEntry::new(180.0, 5.0, 30.0, 5.0, 150.0)),
    ("poha", FoodEntry::new(160.0, 4.0, 28.0, 4.0, 150.0)),
    ("khichdi", FoodEntry::new(200.0, 7.0, 35.0, 4.0, 200.0)),
    ("raita", FoodEntry::new(60.0, 3.0, 5.0, 3.0, 100.0)),
    ("lassi", FoodEntry::new(150.0, 5.0, 20.0, 5.0, 200.0)),
    ("mango lassi", FoodEntry::new(180.0, 5.0, 28.0, 5.0, 200.0)),
    ("chai", FoodEntry::new(80.0, 2.0, 12.0, 2.0, 150.0)),
    ("masala chai", FoodEntry::new(80.0, 2.0, 12.0, 2.0, 150.0)),
    ("gulab jamun", FoodEntry::new(150.0, 2.0, 22.0, 6.0, 50.0)),
    ("jalebi", FoodEntry::new(150.0, 1.0, 30.0, 4.0, 50.0)),
    ("kheer", FoodEntry::new(180.0, 5.0, 28.0, 6.0, 150.0)),
    ("halwa", FoodEntry::new(200.0, 3.0, 30.0, 8.0, 80.0)),
    ("ladoo", FoodEntry::new(180.0, 4.0, 25.0, 8.0, 50.0)),
    ("barfi", FoodEntry::new(160.0, 4.0, 22.0, 7.0, 50.0)),
    ("aloo gobi", FoodEntry::new(120.0, 3.0, 15.0, 6.0, 150.0)),
    ("baingan bharta", FoodEntry::new(130.0, 3.0, 12.0, 8.0, 150.0)),
    ("bhindi masala", FoodEntry::new(100.0, 3.0, 10.0, 6.0, 150.0)),
    ("malai kofta", FoodEntry::new(300.0, 10.0, 20.0, 22.0, 150.0)),
    ("korma", FoodEntry::new(280.0, 15.0, 12.0, 20.0, 150.0)),
    ("tikka", FoodEntry::new(200.0, 22.0, 6.0, 10.0, 150.0)),
    ("kebab", FoodEntry::new(220.0, 18.0, 8.0, 14.0, 100.0)),
    ("seekh kebab", FoodEntry::new(250.0, 20.0, 5.0, 18.0, 100.0)),
    ("fish curry", FoodEntry::new(200.0, 20.0, 8.0, 10.0, 150.0)),
    ("prawn curry", FoodEntry::new(180.0, 18.0, 6.0, 10.0, 150.0)),
    ("mutton curry", FoodEntry::new(280.0, 22.0, 8.0, 18.0, 150.0)),
    ("egg curry", FoodEntry::new(200.0, 14.0, 8.0, 13.0, 150.0)),
    ("thali", FoodEntry::new(800.0, 25.0, 100.0, 30.0, 400.0)),
    // Protein sources
    ("chicken", FoodEntry::new(165.0, 31.0, 0.0, 3.6, 150.0)),
    ("beef", FoodEntry::new(250.0, 26.0, 0.0, 15.0, 150.0)),
    ("fish", FoodEntry::new(206.0, 22.0, 0.0, 12.0, 150.0)),
    ("egg", FoodEntry::new(155.0, 13.0, 1.1, 11.0, 100.0)),
    ("tofu", FoodEntry::new(76.0, 8.0, 1.9, 4.8, 150.0)),
    // Staples
    ("rice", FoodEntry::new(130.0, 2.7, 28.0, 0.3, 200.0)),
    ("pasta", FoodEntry::new(131.0, 5.0, 25.0, 1.1, 200.0)),
    ("bread", FoodEntry::new(265.0, 9.0, 49.0, 3.2, 60.0)),
    ("potato", FoodEntry::new(77.0, 2.0, 17.0, 0.1, 200.0)),
    ("oatmeal", FoodEntry::new(389.0, 17.0, 66.0, 7.0, 80.0)),
    // Produce
    ("banana", FoodEntry::new(89.0, 1.1, 23.0, 0.3, 120.0)),
    ("apple", FoodEntry::new(52.0, 0.3, 14.0, 0.2, 180.0)),
    ("salad", FoodEntry::new(20.0, 1.5, 3.5, 0.2, 100.0)),
    ("broccoli", FoodEntry::new(34.0, 2.8, 7.0, 0.4, 150.0)),
    // Dairy
    ("milk", FoodEntry::new(42.0, 3.4, 5.0, 1.0, 250.0)),
    ("cheese", FoodEntry::new(402.0, 25.0, 1.3, 33.0, 30.0)),
    ("yogurt", FoodEntry::new(59.0, 10.0, 3.6, 0.7, 150.0)),
    // Common meals
    ("pizza", FoodEntry::new(266.0, 11.0, 33.0, 10.0, 200.0)),
    ("burger", FoodEntry::new(295.0, 17.0, 24.0, 14.0, 200.0)),
    ("sandwich", FoodEntry::new(250.0, 12.0, 30.0, 9.0, 180.0)),
    ("noodles", FoodEntry::new(138.0, 4.5, 25.0, 2.0, 250.0)),
    ("soup", FoodEntry::new(75.0, 4.0, 10.0, 2.0, 300.0)),
    ("curry", FoodEntry::new(150.0, 8.0, 12.0, 8.0, 250.0)),
    // Snacks
    ("chips", FoodEntry::new(536.0, 7.0, 53.0, 35.0, 50.0)),
    ("chocolate", FoodEntry::new(546.0, 5.0, 60.0, 31.0, 40.0)),
    ("nuts", FoodEntry::new(607.0, 20.0, 21.0, 54.0, 30.0)),
    ("cookie", FoodEntry::new(488.0, 5.0, 64.0, 24.0, 30.0)),
    // Drinks
    ("juice", FoodEntry::new(45.0, 0.7, 10.0, 0.1, 250.0)),
    ("smoothie", FoodEntry::new(70.0, 2.0, 15.0, 0.5, 300.0)),
    ("coffee", FoodEntry::new(2.0, 0.3, 0.0, 0.0, 250.0)),
    // Generic estimate used when nothing matches
    ("food", FoodEntry::new(200.0, 10.0, 25.0, 8.0, 200.0)),];

/// Keyword to food key, checked in order after table matching fails.
pub const KEYWORD_MAPPINGS: &[(&str, &str)] = &[
    // curries
    ("curry", "dal"),
    ("gravy", "dal"),
    ("stew", "dal"),
    ("lentil", "dal"),
    ("bean", "rajma"),
    ("chickpea", "chole"),
    ("hummus", "chole"),
    // breads
    ("flatbread", "roti"),
    ("tortilla", "roti"),
    ("pita", "naan"),
    ("fried bread", "puri"),
    ("stuffed bread", "paratha"),
    // rice
    ("fried rice", "biryani"),
    ("rice dish", "pulao"),
    ("rice bowl", "biryani"),
    ("pilaf", "pulao"),
    // snacks
    ("fritter", "pakora"),
    ("dumpling", "samosa"),
    ("pastry", "samosa"),
    ("fried snack", "pakora"),
    // south indian
    ("crepe", "dosa"),
    ("pancake", "dosa"),
    ("steamed cake", "idli"),
    ("rice cake", "idli"),
    // drinks
    ("tea", "chai"),
    ("milkshake", "lassi"),
    ("yogurt drink", "lassi"),
    // desserts
    ("dessert", "kheer"),
    ("pudding", "kheer"),
    ("sweet ball", "gulab jamun"),
    ("candy", "ladoo"),
    ("donut", "jalebi"),
    ("fudge", "barfi"),
    // proteins
    ("grilled meat", "tikka"),
    ("skewer", "kebab"),
    ("roasted chicken", "tandoori chicken"),
    ("cottage cheese", "paneer"),
    ("cheese cube", "paneer"),
    // vegetables
    ("cauliflower", "aloo gobi"),
    ("eggplant", "baingan bharta"),
    ("okra", "bhindi masala"),
    ("spinach dish", "palak paneer"),
    // generic classifier labels
    ("meat", "beef"),
    ("steak", "beef"),
    ("pork", "beef"),
    ("poultry", "chicken"),
    ("seafood", "fish"),
    ("salmon", "fish"),
    ("tuna", "fish"),
    ("spaghetti", "pasta"),
    ("noodle", "noodles"),
    ("ramen", "noodles"),
    ("fries", "potato"),
    ("french fries", "potato"),
    ("cereal", "oatmeal"),
    ("cake", "cookie"),
    ("ice cream", "chocolate"),
    ("soda", "juice"),
    ("beverage", "juice"),
    ("vegetable", "salad"),
    ("fruit", "apple"),
];

/// Looks up a food by its exact key.
pub fn lookup(key: &str) -> Option<&'static FoodEntry> {
    FOOD_TABLE
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, entry)| entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<&str> = FOOD_TABLE.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys.len(), FOOD_TABLE.len());
    }

    #[test]
    fn test_fallback_is_last_entry() {
        assert_eq!(FOOD_TABLE.last().map(|(k, _)| *k), Some(FALLBACK_FOOD));
        assert!(lookup(FALLBACK_FOOD).is_some());
    }

    #[test]
    fn test_mappings_point_at_table_keys() {
        for (keyword, key) in KEYWORD_MAPPINGS {
            assert!(lookup(key).is_some(), "{keyword} maps to unknown key {key}");
        }
    }

    #[test]
    fn test_lookup() {
        let roti = lookup("roti").unwrap();
        assert_eq!(roti.fat, 0.4);
        assert_eq!(roti.serving_size, 30.0);
        assert!(lookup("Roti").is_none());
        assert!(lookup("unknown").is_none());
    }
}
