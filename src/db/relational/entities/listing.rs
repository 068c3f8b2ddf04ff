use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "listings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub seller_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub price: Decimal,
    pub currency: String,
    pub category_id: Uuid,
    pub subcategory_id: Option<Uuid>,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub condition: String,
    pub status: String,
    pub images: Json,
    pub location: Option<String>,
    pub view_count: i32,
    pub favorite_count: i32,
    pub is_negotiable: bool,
    pub shipping_included: bool,
    pub shipping_cost: Option<Decimal>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
