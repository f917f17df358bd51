use yew::prelude::*;

use common::model::entity::Entity;

use crate::route::Route;

/// Tags shown on a tile before collapsing the rest into "+N more".
const VISIBLE_TAGS: usize = 3;

#[derive(Properties, PartialEq, Clone)]
pub struct EntityTileProps {
    pub entity: Entity,
}

/// Compact card linking to the entity's detail page.
pub struct EntityTile;

impl Component for EntityTile {
    type Message = ();
    type Properties = EntityTileProps;

    fn create(_ctx: &Context<Self>) -> Self {
        EntityTile
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let entity = &ctx.props().entity;
        let image = entity.image_url.as_deref().filter(|url| !url.is_empty());
        let hidden_tags = entity.tags.len().saturating_sub(VISIBLE_TAGS);

        html! {
            <a class="entity-tile" href={Route::EntityDetail(entity.id).to_hash()}>
                <div class="tile-image">
                    {
                        match image {
                            Some(url) => html! { <img src={url.to_string()} alt={entity.name.clone()} /> },
                            None => html! { <div class="no-image">{"No Image"}</div> },
                        }
                    }
                </div>
                <div class="tile-body">
                    <span class="badge">{ entity.entity_type.as_str() }</span>
                    <h3 class="tile-name">{ entity.name.clone() }</h3>
                    <p class="tile-locator">{ entity.locator.clone() }</p>
                    <div class="tile-tags">
                        { for entity.tags.iter().take(VISIBLE_TAGS).map(|tag| html! { <span class="chip">{ tag.clone() }</span> }) }
                        if hidden_tags > 0 {
                            <span class="more-tags">{ format!("+{} more", hidden_tags) }</span>
                        }
                    </div>
                </div>
            </a>
        }
    }
}
