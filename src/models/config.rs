use crate::schema::config;

#[derive(Queryable, Insertable)]
#[table_name = "config"]
pub struct ConfigData {
    pub config_key: String,
    pub config_value: String,
}
