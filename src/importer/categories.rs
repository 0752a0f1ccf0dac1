use crate::{
    catalog::{
        CreatedPlaylist, DestinationCatalog, PlaylistEntry, Release, SourceCatalog,
        SourcePlaylist, TrackRef,
    },
    config::Category,
    errors::ImportError,
    importer::{Importer, item::SourceItem, report::ImportSection},
    info, utils,
};

/// Size the source cover is downloaded at.
pub const COVER_SIZE: &str = "400x400";

impl<'a, D: DestinationCatalog + ?Sized> Importer<'a, D> {
    pub(crate) async fn import_likes<S>(&mut self, source: &S) -> Result<(), ImportError>
    where
        S: SourceCatalog + ?Sized,
    {
        let mut section = ImportSection::new(Category::Likes.section_name());
        let result = self.save_likes(source, &mut section).await;
        self.report.add(section);
        result
    }

    async fn save_likes<S>(&self, source: &S, section: &mut ImportSection) -> Result<(), ImportError>
    where
        S: SourceCatalog + ?Sized,
    {
        let liked = source.liked_tracks().await?;
        let ids: Vec<String> = liked
            .iter()
            .filter(|t| t.album_id.is_some())
            .map(TrackRef::full_id)
            .collect();
        let tracks = fetch_full_tracks(source, &ids).await?;
        info!("Importing liked tracks...");

        let (destination, retry) = (self.destination, self.retry);
        let items = tracks.into_iter().map(SourceItem::Track).collect();
        self.pipeline()
            .ingest(items, section, |chunk| async move {
                info!("Saving {} tracks...", chunk.len());
                retry.run(|| destination.add_saved_tracks(&chunk)).await
            })
            .await?;

        Ok(())
    }

    pub(crate) async fn import_playlists<S>(&mut self, source: &S) -> Result<(), ImportError>
    where
        S: SourceCatalog + ?Sized,
    {
        let playlists = source.playlists().await?;
        for playlist in playlists {
            let created = self.create_playlist(source, &playlist).await?;
            let mut section = ImportSection::new(playlist.title.clone());
            let result = self
                .save_playlist(source, &playlist, &created, &mut section)
                .await;
            self.report.add(section);
            result?;
        }

        Ok(())
    }

    /// Creates the destination playlist and copies a picture cover over.
    async fn create_playlist<S>(
        &self,
        source: &S,
        playlist: &SourcePlaylist,
    ) -> Result<CreatedPlaylist, ImportError>
    where
        S: SourceCatalog + ?Sized,
    {
        let (destination, retry) = (self.destination, self.retry);
        let user = self.user.as_str();

        let created = retry
            .run(|| destination.create_playlist(user, &playlist.title))
            .await?;
        info!("Importing playlist {}...", playlist.title);

        if playlist.has_picture_cover() {
            let bytes = source.download_cover(playlist, COVER_SIZE).await?;
            let encoded = utils::encode_cover_jpeg_base64(&bytes)?;
            retry
                .run(|| destination.set_playlist_cover_image(&created.id, &encoded))
                .await?;
        }

        Ok(created)
    }

    async fn save_playlist<S>(
        &self,
        source: &S,
        playlist: &SourcePlaylist,
        created: &CreatedPlaylist,
        section: &mut ImportSection,
    ) -> Result<(), ImportError>
    where
        S: SourceCatalog + ?Sized,
    {
        let (destination, retry) = (self.destination, self.retry);
        let user = self.user.as_str();

        let entries = source.playlist_tracks(playlist).await?;
        let tracks: Vec<Release> = if !playlist.collaborative {
            entries.into_iter().filter_map(|e| e.track).collect()
        } else if !entries.is_empty() {
            let ids: Vec<String> = entries
                .iter()
                .map(|e: &PlaylistEntry| &e.track_ref)
                .filter(|t| t.album_id.is_some())
                .map(TrackRef::full_id)
                .collect();
            fetch_full_tracks(source, &ids).await?
        } else {
            Vec::new()
        };

        let playlist_id = created.id.as_str();
        let title = playlist.title.as_str();
        let items = tracks.into_iter().map(SourceItem::Track).collect();
        self.pipeline()
            .ingest(items, section, |chunk| async move {
                info!("Saving {} tracks in playlist {}...", chunk.len(), title);
                retry
                    .run(|| destination.add_tracks_to_playlist(user, playlist_id, &chunk))
                    .await
            })
            .await?;

        Ok(())
    }

    pub(crate) async fn import_albums<S>(&mut self, source: &S) -> Result<(), ImportError>
    where
        S: SourceCatalog + ?Sized,
    {
        let mut section = ImportSection::new(Category::Albums.section_name());
        let result = self.save_albums(source, &mut section).await;
        self.report.add(section);
        result
    }

    async fn save_albums<S>(&self, source: &S, section: &mut ImportSection) -> Result<(), ImportError>
    where
        S: SourceCatalog + ?Sized,
    {
        let albums = source.liked_albums().await?;
        info!("Importing albums...");

        let (destination, retry) = (self.destination, self.retry);
        let items = albums.into_iter().map(SourceItem::Album).collect();
        self.pipeline()
            .ingest(items, section, |chunk| async move {
                info!("Saving {} albums...", chunk.len());
                retry.run(|| destination.add_saved_albums(&chunk)).await
            })
            .await?;

        Ok(())
    }

    pub(crate) async fn import_artists<S>(&mut self, source: &S) -> Result<(), ImportError>
    where
        S: SourceCatalog + ?Sized,
    {
        let mut section = ImportSection::new(Category::Artists.section_name());
        let result = self.save_artists(source, &mut section).await;
        self.report.add(section);
        result
    }

    async fn save_artists<S>(&self, source: &S, section: &mut ImportSection) -> Result<(), ImportError>
    where
        S: SourceCatalog + ?Sized,
    {
        let artists = source.liked_artists().await?;
        info!("Importing artists...");

        let (destination, retry) = (self.destination, self.retry);
        let items = artists.into_iter().map(SourceItem::Artist).collect();
        self.pipeline()
            .ingest(items, section, |chunk| async move {
                info!("Saving {} artists...", chunk.len());
                retry.run(|| destination.follow_artists(&chunk)).await
            })
            .await?;

        Ok(())
    }
}

async fn fetch_full_tracks<S>(source: &S, ids: &[String]) -> Result<Vec<Release>, ImportError>
where
    S: SourceCatalog + ?Sized,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    Ok(source.fetch_full_tracks(ids).await?)
}
