// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-OverseerrMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of overseerr-mcp and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::input::ClearSessionParams;
use super::output::ClearOutput;
use super::Toolbox;
use crate::model::SessionId;
use crate::store::SessionKey;

impl Toolbox {
    pub fn clear_search_results(
        &self,
        session_id: Option<&SessionId>,
        params: &ClearSessionParams,
    ) -> ClearOutput {
        let Some(session_id) = session_id else {
            return ClearOutput {
                cleared: false,
                message: "No session; nothing is stored for this connection.".to_owned(),
            };
        };

        let everything = params.clears_everything();
        let cleared = if everything {
            self.sessions.clear_session(session_id)
        } else {
            self.sessions.clear_key(session_id, SessionKey::LastSearchResults)
        };
        log::debug!("cleared session {session_id} (all: {everything}, had data: {cleared})");

        let message = match (cleared, everything) {
            (true, true) => "Cleared all data for this session.",
            (true, false) => "Cleared the stored search results.",
            (false, _) => "Nothing was stored for this session.",
        };
        ClearOutput { cleared, message: message.to_owned() }
    }
}
