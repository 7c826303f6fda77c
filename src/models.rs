use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealEntry {
    pub meal: String,
    pub calories: u64,
    pub protein: u64,
    pub date: String,
}

/// One snapshot of the ledger totals, keyed by the date string it was saved under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotal {
    pub date: String,
    pub total_calories: u64,
    pub total_protein: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub calories: u64,
    pub protein: u64,
}

#[derive(Debug, Deserialize)]
pub struct AddMealRequest {
    #[serde(default)]
    pub meal: String,
    #[serde(default)]
    pub calories: String,
    #[serde(default)]
    pub protein: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MealsResponse {
    pub meals: Vec<MealEntry>,
    pub totals: Totals,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddMealResponse {
    pub added: bool,
    pub meals: Vec<MealEntry>,
    pub totals: Totals,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_total_uses_camel_case_fields() {
        let total = DailyTotal {
            date: "1/5/2026".to_string(),
            total_calories: 800,
            total_protein: 50,
        };
        let json = serde_json::to_value(&total).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "date": "1/5/2026", "totalCalories": 800, "totalProtein": 50 })
        );
    }

    #[test]
    fn meal_list_round_trips_through_json() {
        let meals = vec![
            MealEntry {
                meal: "oats".to_string(),
                calories: 350,
                protein: 12,
                date: "1/5/2026".to_string(),
            },
            MealEntry {
                meal: "oats".to_string(),
                calories: 350,
                protein: 12,
                date: "1/5/2026".to_string(),
            },
        ];
        let encoded = serde_json::to_string(&meals).unwrap();
        let decoded: Vec<MealEntry> = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, meals);
    }

    #[test]
    fn meal_entry_decodes_regardless_of_field_order() {
        let decoded: MealEntry = serde_json::from_str(
            r#"{"date":"2/1/2026","protein":7,"meal":"toast","calories":120}"#,
        )
        .unwrap();
        assert_eq!(decoded.meal, "toast");
        assert_eq!(decoded.calories, 120);
        assert_eq!(decoded.protein, 7);
    }
}
