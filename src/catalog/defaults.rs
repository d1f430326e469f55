use crate::catalog::schema::{
    InterventionCategory, InterventionTemplate, Priority, SchemeDefinition,
};

pub const PM_KISAN: &str = "SCH001";
pub const JAL_JEEVAN_MISSION: &str = "SCH002";
pub const MGNREGA: &str = "SCH003";
pub const VAN_DHAN_YOJANA: &str = "SCH004";

pub const GROUNDWATER_RECHARGING: &str = "INT001";
pub const SUSTAINABLE_HARVESTING: &str = "INT002";
pub const CLIMATE_RESILIENT_CROPS: &str = "INT003";
pub const DIGITAL_LITERACY: &str = "INT004";

pub fn builtin_schemes() -> Vec<SchemeDefinition> {
    vec![
        SchemeDefinition::new(
            PM_KISAN,
            "PM-KISAN",
            "Income support for landholding cultivator families",
            "Rs 6,000 per year paid directly in three instalments",
        ),
        SchemeDefinition::new(
            JAL_JEEVAN_MISSION,
            "Jal Jeevan Mission",
            "Functional household tap connection for every rural home",
            "Assured supply of potable water at 55 litres per person per day",
        ),
        SchemeDefinition::new(
            MGNREGA,
            "MGNREGA",
            "Guaranteed wage employment for rural households",
            "100 days of wage employment per household per year, including land development work",
        ),
        SchemeDefinition::new(
            VAN_DHAN_YOJANA,
            "Van Dhan Yojana",
            "Value addition and marketing for minor forest produce",
            "Training, working capital and market linkage through Van Dhan Kendras",
        ),
    ]
}

pub fn builtin_interventions() -> Vec<InterventionTemplate> {
    vec![
        InterventionTemplate {
            id: GROUNDWATER_RECHARGING.to_string(),
            category: InterventionCategory::Water,
            name: "Groundwater Recharging".to_string(),
            description: "Check dams and percolation tanks to raise groundwater levels".to_string(),
            priority: Priority::High,
        },
        InterventionTemplate {
            id: SUSTAINABLE_HARVESTING.to_string(),
            category: InterventionCategory::Forestry,
            name: "Sustainable Harvesting Training".to_string(),
            description: "Training on sustainable harvesting of non-timber forest products"
                .to_string(),
            priority: Priority::Medium,
        },
        InterventionTemplate {
            id: CLIMATE_RESILIENT_CROPS.to_string(),
            category: InterventionCategory::Agriculture,
            name: "Climate-Resilient Crop Varieties".to_string(),
            description: "Drought-resistant crop varieties suited to forest fringe plots"
                .to_string(),
            priority: Priority::Medium,
        },
        InterventionTemplate {
            id: DIGITAL_LITERACY.to_string(),
            category: InterventionCategory::Education,
            name: "Digital Literacy Program".to_string(),
            description: "Mobile-based training for reaching scheme portals and market prices"
                .to_string(),
            priority: Priority::Medium,
        },
    ]
}
