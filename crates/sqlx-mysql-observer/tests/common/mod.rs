//! Minimal in-process MySQL server for tests.
//!
//! Speaks just enough of the client/server protocol for sqlx to connect:
//! a v10 handshake advertising `mysql_native_password` (any credentials are
//! accepted), then an OK packet for every command until `COM_QUIT`.

use std::io;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const COM_QUIT: u8 = 0x01;

const CLIENT_LONG_PASSWORD: u32 = 0x0000_0001;
const CLIENT_CONNECT_WITH_DB: u32 = 0x0000_0008;
const CLIENT_PROTOCOL_41: u32 = 0x0000_0200;
const CLIENT_TRANSACTIONS: u32 = 0x0000_2000;
const CLIENT_SECURE_CONNECTION: u32 = 0x0000_8000;
const CLIENT_PLUGIN_AUTH: u32 = 0x0008_0000;

const SERVER_CAPABILITIES: u32 = CLIENT_LONG_PASSWORD
   | CLIENT_CONNECT_WITH_DB
   | CLIENT_PROTOCOL_41
   | CLIENT_TRANSACTIONS
   | CLIENT_SECURE_CONNECTION
   | CLIENT_PLUGIN_AUTH;

// header, affected rows, last insert id, SERVER_STATUS_AUTOCOMMIT, no warnings
const OK_PACKET: [u8; 7] = [0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00];

/// Starts a server on an ephemeral loopback port and returns that port.
///
/// Every accepted connection waits `handshake_delay` before greeting the
/// client, which keeps an `open()` pending for that long.
pub async fn start(handshake_delay: Duration) -> u16 {
   let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
   let port = listener.local_addr().unwrap().port();

   tokio::spawn(async move {
      while let Ok((socket, _)) = listener.accept().await {
         tokio::spawn(async move {
            let _ = serve(socket, handshake_delay).await;
         });
      }
   });

   port
}

async fn serve(mut socket: TcpStream, handshake_delay: Duration) -> io::Result<()> {
   tokio::time::sleep(handshake_delay).await;
   write_packet(&mut socket, 0, &handshake()).await?;

   let (seq, _response) = read_packet(&mut socket).await?;
   write_packet(&mut socket, seq.wrapping_add(1), &OK_PACKET).await?;

   loop {
      let (seq, command) = read_packet(&mut socket).await?;
      if command.first() == Some(&COM_QUIT) {
         return Ok(());
      }
      write_packet(&mut socket, seq.wrapping_add(1), &OK_PACKET).await?;
   }
}

fn handshake() -> Vec<u8> {
   let scramble: Vec<u8> = (1..=20).collect();
   let caps = SERVER_CAPABILITIES.to_le_bytes();

   let mut payload = vec![10];
   payload.extend_from_slice(b"8.0.36\0");
   payload.extend_from_slice(&7u32.to_le_bytes());
   payload.extend_from_slice(&scramble[..8]);
   payload.push(0);
   payload.extend_from_slice(&caps[..2]);
   payload.push(255); // utf8mb4_0900_ai_ci
   payload.extend_from_slice(&0x0002u16.to_le_bytes());
   payload.extend_from_slice(&caps[2..]);
   payload.push(21);
   payload.extend_from_slice(&[0; 10]);
   payload.extend_from_slice(&scramble[8..]);
   payload.push(0);
   payload.extend_from_slice(b"mysql_native_password\0");
   payload
}

async fn read_packet(socket: &mut TcpStream) -> io::Result<(u8, Vec<u8>)> {
   let mut header = [0u8; 4];
   socket.read_exact(&mut header).await?;
   let len = u32::from_le_bytes([header[0], header[1], header[2], 0]) as usize;

   let mut payload = vec![0u8; len];
   socket.read_exact(&mut payload).await?;
   Ok((header[3], payload))
}

async fn write_packet(socket: &mut TcpStream, seq: u8, payload: &[u8]) -> io::Result<()> {
   let len = (payload.len() as u32).to_le_bytes();
   socket
      .write_all(&[len[0], len[1], len[2], seq])
      .await?;
   socket.write_all(payload).await?;
   socket.flush().await
}
