//! SeaORM implementation of CampsiteRepository

use async_trait::async_trait;
use log::info;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::campsite::{Campsite, CampsiteRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::campsite;
use crate::infrastructure::database::transaction::classify;

pub struct SeaOrmCampsiteRepository {
    db: DatabaseConnection,
}

impl SeaOrmCampsiteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: campsite::Model) -> Campsite {
    Campsite {
        id: Some(m.id),
        campsite_id: m.campsite_id,
        campsite_code: m.campsite_code,
        capacity: m.capacity,
        restrooms: m.restrooms,
        drinking_water: m.drinking_water,
        picnic_table: m.picnic_table,
        fire_pit: m.fire_pit,
        active: m.active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl CampsiteRepository for SeaOrmCampsiteRepository {
    async fn find_all(&self) -> DomainResult<Vec<Campsite>> {
        let models = campsite::Entity::find()
            .order_by_asc(campsite::Column::CampsiteCode)
            .all(&self.db)
            .await
            .map_err(classify)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_id(&self, campsite_id: &str) -> DomainResult<Option<Campsite>> {
        let model = campsite::Entity::find()
            .filter(campsite::Column::CampsiteId.eq(campsite_id))
            .one(&self.db)
            .await
            .map_err(classify)?;
        Ok(model.map(model_to_domain))
    }

    async fn insert(&self, c: &Campsite) -> DomainResult<()> {
        let model = campsite::ActiveModel {
            campsite_id: Set(c.campsite_id.clone()),
            campsite_code: Set(c.campsite_code.clone()),
            capacity: Set(c.capacity),
            restrooms: Set(c.restrooms),
            drinking_water: Set(c.drinking_water),
            picnic_table: Set(c.picnic_table),
            fire_pit: Set(c.fire_pit),
            active: Set(c.active),
            created_at: Set(c.created_at),
            updated_at: Set(c.updated_at),
            ..Default::default()
        };
        model.insert(&self.db).await.map_err(classify)?;
        info!("Campsite {} ({}) created", c.campsite_id, c.campsite_code);
        Ok(())
    }
}
